use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use cachet::{http, initialize, RootConfig, RootError};

/// Cachet: credential issuance API over a tag-indexed record store.
#[derive(Parser, Debug)]
#[command(name = "cachet", version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        bind: Option<String>,

        /// Port
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("cachet=debug,cachet_store=debug,cachet_cred=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cachet=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<RootConfig, RootError> {
    match path {
        Some(p) => RootConfig::load(p),
        None => RootConfig::load(&RootConfig::default_config_path()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), RootError> {
    match cli.command {
        Commands::Init => cmd_init(cli.config.as_ref()),
        Commands::Serve { bind, port } => cmd_serve(cli.config.as_ref(), bind, port).await,
    }
}

fn cmd_init(config_path: Option<&PathBuf>) -> Result<(), RootError> {
    let config = load_config(config_path)?;
    let save_path = config_path
        .cloned()
        .unwrap_or_else(RootConfig::default_config_path);
    config.save(&save_path)?;

    println!("Cachet initialized.");
    println!("  Config:  {}", save_path.display());
    println!("  Server:  {}:{}", config.server.bind, config.server.port);
    Ok(())
}

async fn cmd_serve(
    config_path: Option<&PathBuf>,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<(), RootError> {
    let mut config = load_config(config_path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = Arc::new(initialize(config)?);
    let addr = format!("{}:{}", state.config.server.bind, state.config.server.port);
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "cachet server listening");
    println!("Cachet API server running on http://{}", addr);
    println!("Health check: http://{}/health", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

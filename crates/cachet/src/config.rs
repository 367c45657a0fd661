use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RootError, RootResult};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow any origin (development). Disable behind a real gateway.
    #[serde(default = "default_permissive_cors")]
    pub permissive_cors: bool,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_permissive_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            permissive_cors: default_permissive_cors(),
        }
    }
}

/// Issuer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// URI identifying the employee credential type (`vct` claim value).
    #[serde(default = "default_employee_vct_uri")]
    pub employee_vct_uri: String,
}

fn default_employee_vct_uri() -> String {
    cachet_cred::metadata::EMPLOYEE_VCT_URI.to_string()
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            employee_vct_uri: default_employee_vct_uri(),
        }
    }
}

/// Top-level configuration for the cachet binary.
///
/// Loaded from a TOML file (typically `~/.cachet/config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    /// Tenant under which the HTTP layer stores records. The store itself
    /// is fully tenant-parameterized; the server runs under one tenant.
    #[serde(default = "default_tenant")]
    pub default_tenant: String,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Issuer configuration.
    #[serde(default)]
    pub issuer: IssuerConfig,
}

fn default_tenant() -> String {
    "default".to_string()
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            default_tenant: default_tenant(),
            server: ServerConfig::default(),
            issuer: IssuerConfig::default(),
        }
    }
}

impl RootConfig {
    /// Load configuration from a TOML file. If the file does not exist,
    /// returns a default configuration.
    pub fn load(path: &Path) -> RootResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(RootError::Io)?;
        let config: RootConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> RootResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RootError::Config(format!("TOML serialize error: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RootError::Io)?;
        }
        std::fs::write(path, contents).map_err(RootError::Io)?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> RootResult<()> {
        if self.default_tenant.trim().is_empty() {
            return Err(RootError::Config("default_tenant must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(RootError::Config("server.port must be > 0".into()));
        }
        if self.issuer.employee_vct_uri.trim().is_empty() {
            return Err(RootError::Config(
                "issuer.employee_vct_uri must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Return the path to the default config file location.
    pub fn default_config_path() -> PathBuf {
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".cachet/config.toml"))
            .unwrap_or_else(|_| PathBuf::from(".cachet/config.toml"))
    }
}

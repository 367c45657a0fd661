//! Axum HTTP handlers for the cachet server.
//!
//! REST endpoints for W3C credential issuance and retrieval, employee
//! SD-JWT VC issuance, VC type metadata, and health checks. Request bodies
//! are validated field by field so malformed input produces a 400 with an
//! `{error, message}` body rather than a framework rejection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use cachet_core::{CredentialId, HolderId};
use cachet_cred::issuance::issue_credential;
use cachet_cred::metadata::employee_vc_type_metadata;
use cachet_cred::sdjwt::issue_employee_sd_jwt;
use cachet_cred::types::{
    CreateCredentialRequest, EmployeeCredentialRequest, EmployeeCredentialResponse,
};
use cachet_cred::IssuerAgent;
use cachet_store::StoreError;

use crate::error::RootError;
use crate::AppState;

/// Build the axum router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/v1/credentials",
            post(handle_issue_credential).get(handle_list_credentials),
        )
        .route("/api/v1/credentials/{id}", get(handle_get_credential))
        .route("/credentials/employee", post(handle_issue_employee))
        .route("/.well-known/vct/employee", get(handle_employee_vct))
        .fallback(handle_not_found);

    if state.config.server.permissive_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn error_body(error: &str, message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "error": error,
        "message": message.into(),
    }))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, error_body("VALIDATION_ERROR", message))
}

/// Map an internal error to an HTTP response. The store's typed failures
/// carry their own status codes; everything else is a 500.
fn error_response(err: &RootError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        RootError::Store(StoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            error_body("Not Found", err.to_string()),
        ),
        RootError::Store(StoreError::Duplicate { .. }) => (
            StatusCode::CONFLICT,
            error_body("Conflict", err.to_string()),
        ),
        RootError::Store(StoreError::InvalidQuery(_)) => {
            (StatusCode::BAD_REQUEST, error_body("Bad Request", err.to_string()))
        }
        _ => {
            warn!(error = %err, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Internal Server Error", err.to_string()),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "cachet",
        "version": env!("CARGO_PKG_VERSION"),
        "issuer_did": state.issuer.did(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// ---------------------------------------------------------------------------
// POST /api/v1/credentials
// ---------------------------------------------------------------------------

async fn handle_issue_credential(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let issuer_ok = body
        .get("issuer")
        .and_then(|v| v.as_str())
        .is_some_and(|s| !s.trim().is_empty());
    if !issuer_ok {
        return bad_request("issuer is required").into_response();
    }
    if !body.get("credentialSubject").is_some_and(|v| v.is_object()) {
        return bad_request("credentialSubject is required").into_response();
    }

    let request: CreateCredentialRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return bad_request(format!("invalid request body: {}", e)).into_response(),
    };

    let credential = match issue_credential(state.issuer.as_ref(), &request) {
        Ok(credential) => credential,
        Err(e) => return error_response(&e.into()).into_response(),
    };

    let holder_id: Option<HolderId> = request.credential_subject.id.clone();
    if let Err(e) = state.directory.save(&credential, holder_id) {
        return error_response(&e).into_response();
    }

    info!(credential_id = %credential.id, "credential issued");
    (StatusCode::CREATED, Json(credential)).into_response()
}

// ---------------------------------------------------------------------------
// GET /api/v1/credentials/{id}
// ---------------------------------------------------------------------------

async fn handle_get_credential(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.directory.find_by_id(&CredentialId::new(id)) {
        Ok(Some(credential)) => (StatusCode::OK, Json(credential)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            error_body("Not Found", "Credential not found"),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

// ---------------------------------------------------------------------------
// GET /api/v1/credentials[?holder_id=...]
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListParams {
    holder_id: Option<String>,
}

async fn handle_list_credentials(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let result = match params.holder_id {
        Some(holder_id) => state.directory.find_by_holder(&HolderId::new(holder_id)),
        None => state.directory.find_all(),
    };
    match result {
        Ok(credentials) => (StatusCode::OK, Json(credentials)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

// ---------------------------------------------------------------------------
// POST /credentials/employee
// ---------------------------------------------------------------------------

async fn handle_issue_employee(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let required = ["firstName", "lastName", "jobTitle", "startDate"];
    for field in required {
        let ok = body
            .get(field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return bad_request(format!("Missing or invalid required field: {}", field))
                .into_response();
        }
    }

    let start_date = body["startDate"].as_str().unwrap_or_default();
    if !is_iso_date(start_date) {
        return bad_request("startDate must be a valid ISO 8601 date (YYYY-MM-DD)")
            .into_response();
    }

    let mut end_date = None;
    if let Some(value) = body.get("endDate") {
        let Some(s) = value.as_str().filter(|s| !s.trim().is_empty()) else {
            return bad_request("endDate must be a non-empty string when provided")
                .into_response();
        };
        if !is_iso_date(s) {
            return bad_request("endDate must be a valid ISO 8601 date (YYYY-MM-DD)")
                .into_response();
        }
        end_date = Some(s.to_string());
    }

    let request = EmployeeCredentialRequest {
        first_name: body["firstName"].as_str().unwrap_or_default().to_string(),
        last_name: body["lastName"].as_str().unwrap_or_default().to_string(),
        job_title: body["jobTitle"].as_str().unwrap_or_default().to_string(),
        start_date: start_date.to_string(),
        end_date,
    };

    match issue_employee_sd_jwt(
        state.issuer.as_ref(),
        &state.config.issuer.employee_vct_uri,
        &request,
    ) {
        Ok(credential) => {
            info!("employee credential issued");
            (
                StatusCode::CREATED,
                Json(EmployeeCredentialResponse {
                    credential,
                    format: "vc+sd-jwt".into(),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(&e.into()).into_response(),
    }
}

/// Validate an ISO 8601 calendar date (YYYY-MM-DD). Rejects both malformed
/// shapes and impossible dates such as 2024-02-30.
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return false;
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

// ---------------------------------------------------------------------------
// GET /.well-known/vct/employee
// ---------------------------------------------------------------------------

async fn handle_employee_vct(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(employee_vc_type_metadata(&state.config.issuer.employee_vct_uri))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

async fn handle_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        error_body("Not Found", "The requested resource was not found"),
    )
}

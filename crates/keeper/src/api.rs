//! HTTP surface: health, prepare-launch, and the scan trigger
//!
//! The scan endpoint always returns 200 with a structured report when the
//! cycle ran, even if individual events failed; only auth, configuration,
//! and transport problems produce non-200.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use launchpad_types::{LaunchError, PreparedLaunch, ScanReport};

use crate::launch::{LaunchService, PrepareOverrides};
use crate::parser::validate_fields;
use crate::scanner::Scanner;

#[derive(Clone)]
pub struct ApiState {
    pub scanner: Arc<Scanner>,
    pub launch: Arc<LaunchService>,
    pub scan_secret: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: impl AsRef<str>) -> ApiError {
    (status, Json(json!({ "error": message.as_ref() })))
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/scan", get(scan_handler))
        .route("/prepare-launch", post(prepare_launch_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Start the API server on the configured bind address.
pub async fn start_server(
    state: ApiState,
    bind_address: &str,
) -> anyhow::Result<tokio::task::JoinHandle<()>> {
    let app = create_router(state);
    let listener = TcpListener::bind(bind_address).await?;
    info!("API server listening on {bind_address}");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {e}");
        }
    });
    Ok(handle)
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": "launchpad-keeper",
    }))
}

/// Scheduled scan trigger. Requires the shared-secret bearer credential
/// when one is configured.
async fn scan_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<ScanReport>, ApiError> {
    if let Some(secret) = &state.scan_secret {
        let expected = format!("Bearer {secret}");
        let presented = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if presented != expected {
            return Err(error_body(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }

    match state.scanner.scan_once().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err(error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenDetailsBody {
    name: String,
    symbol: String,
    wallet: String,
    description: String,
    image: String,
    website: Option<String>,
    social: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrepareLaunchBody {
    token_details: Option<TokenDetailsBody>,
    /// Legacy identity-lookup payload; rejected with a migration error.
    agent_address: Option<String>,
    chain_id: Option<u64>,
    duration_blocks: Option<u64>,
    currency: Option<alloy::primitives::Address>,
}

/// Assemble launch parameters for a direct token-detail payload.
async fn prepare_launch_handler(
    State(state): State<ApiState>,
    Json(body): Json<PrepareLaunchBody>,
) -> Result<Json<PreparedLaunch>, ApiError> {
    let Some(details) = body.token_details else {
        if body.agent_address.is_some() {
            return Err(error_body(
                StatusCode::BAD_REQUEST,
                "identity lookup payloads are no longer supported; send tokenDetails \
                 {name, symbol, wallet, description, image} instead",
            ));
        }
        return Err(error_body(StatusCode::BAD_REQUEST, "tokenDetails is required"));
    };

    if let Some(chain_id) = body.chain_id {
        if chain_id != state.launch.chain_id() {
            return Err(error_body(
                StatusCode::BAD_REQUEST,
                format!(
                    "this keeper serves chain {}, got chainId {chain_id}",
                    state.launch.chain_id()
                ),
            ));
        }
    }

    let request = validate_fields(
        &details.name,
        &details.symbol,
        &details.wallet,
        &details.description,
        &details.image,
        details.website.as_deref(),
        details.social.as_deref(),
    )
    .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;

    let overrides = PrepareOverrides {
        duration_blocks: body.duration_blocks,
        currency: body.currency,
    };
    match state.launch.prepare(&request, &overrides).await {
        Ok(prepared) => Ok(Json(prepared)),
        Err(e @ LaunchError::Validation(_)) => {
            Err(error_body(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => Err(error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

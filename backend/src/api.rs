//! REST API
//!
//! HTTP surface of the coalescing service: the `/coalesce` endpoint, a
//! liveness probe, and the mapping from `CoalesceError` to JSON error
//! responses.

use crate::{
    coalescer::DataCoalescer,
    config::Config,
    error::{CoalesceError, Result},
    provider_client::ProviderClient,
    strategy::CoalesceStrategy,
    types::CoalescedResult,
};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub providers: Arc<ProviderClient>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/coalesce", get(coalesce))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CoalesceQuery {
    pub member_id: i64,
    pub strategy: Option<String>,
}

/// GET /coalesce?member_id=<id>&strategy=<optional name>
///
/// Fans the member id out to every configured provider and returns the
/// merged benefit fields. With no `strategy` parameter the configured
/// default applies.
async fn coalesce(
    State(state): State<AppState>,
    Query(params): Query<CoalesceQuery>,
) -> Result<Json<CoalescedResult>> {
    info!(
        "Received GET /coalesce?member_id={}&strategy={}",
        params.member_id,
        params.strategy.as_deref().unwrap_or("default")
    );

    let result =
        coalesce_for_member(&state, params.member_id, params.strategy.as_deref()).await?;

    info!("Coalesced result: {:?}", result);
    Ok(Json(result))
}

/// Fetch-then-coalesce pipeline behind the endpoint
///
/// The strategy name is resolved up front so a bad name is rejected before
/// any provider is contacted. When not a single provider could be fetched,
/// the coalescer is never invoked.
async fn coalesce_for_member(
    state: &AppState,
    member_id: i64,
    strategy: Option<&str>,
) -> Result<CoalescedResult> {
    let name = strategy.unwrap_or(&state.config.coalesce.default_strategy);
    let coalescer = DataCoalescer::new(name.parse::<CoalesceStrategy>()?);

    let responses = state
        .providers
        .fetch_all(member_id, &state.config.coalesce.api_urls)
        .await;

    if responses.is_empty() {
        error!("Failed to fetch data from all APIs");
        return Err(CoalesceError::AllProvidersFailed);
    }

    coalescer.coalesce(&responses)
}

/// GET /health
///
/// Liveness probe
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        providers: state.config.coalesce.api_urls.len(),
        default_strategy: state.config.coalesce.default_strategy.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub providers: usize,
    pub default_strategy: String,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

impl IntoResponse for CoalesceError {
    fn into_response(self) -> Response {
        let status = match self {
            CoalesceError::UnknownStrategy(_) => StatusCode::BAD_REQUEST,
            CoalesceError::AllProvidersFailed => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

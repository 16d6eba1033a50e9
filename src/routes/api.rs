use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    connect_source, generate_campaign, health_check, list_channels, list_data_sources,
};
use crate::state::AppState;

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/data-sources", get(list_data_sources))
        .route("/channels", get(list_channels))
        .route("/connect", post(connect_source))
        .route("/generate-campaign", get(generate_campaign))
        .with_state(state)
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info, warn};

use crate::catalog;
use crate::models::{ConnectRequest, ConnectResponse, ErrorResponse};
use crate::sessions::StoreError;
use crate::state::AppState;

/// Connect a data source to a session
pub async fn connect_source(
    State(state): State<AppState>,
    Json(payload): Json<ConnectRequest>,
) -> Result<(StatusCode, Json<ConnectResponse>), (StatusCode, Json<ErrorResponse>)> {
    let connected = match state.sessions.connect(&payload.session_id, &payload.source) {
        Ok(names) => names,
        Err(StoreError::UnknownSource) => {
            warn!(source = %payload.source, "rejected connect for unknown data source");
            return Err(ErrorResponse::reply(
                StatusCode::BAD_REQUEST,
                "Invalid data source",
            ));
        }
        Err(err) => {
            error!("connect failed for session '{}': {err}", payload.session_id);
            return Err(ErrorResponse::reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
            ));
        }
    };

    // The store accepted the id, so the catalog lookup cannot miss.
    let source = match catalog::find_source(&payload.source) {
        Some(source) => source,
        None => {
            error!("source '{}' accepted by store but missing from catalog", payload.source);
            return Err(ErrorResponse::reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Data source catalog is inconsistent",
            ));
        }
    };

    info!(
        session_id = %payload.session_id,
        source = %source.id,
        connected = connected.len(),
        "data source connected"
    );

    Ok((
        StatusCode::OK,
        Json(ConnectResponse {
            success: true,
            source_display_name: source.name.to_string(),
            mock_payload: catalog::mock_payload(source.id),
            connected_source_display_names: connected.iter().map(|n| n.to_string()).collect(),
        }),
    ))
}

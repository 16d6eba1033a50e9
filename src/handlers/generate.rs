use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::sse::{KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::{ErrorResponse, GenerateParams};
use crate::sessions::StoreError;
use crate::state::AppState;
use crate::streaming::campaign_stream;

/// Open the campaign push channel for a session.
///
/// Preconditions are checked before the stream opens: an unknown session or a
/// session without connected sources gets an immediate JSON error, never a
/// stream. Once the stream is open it ends in exactly one of two ways - the
/// terminal frame is delivered, or the client disconnects and the emitter is
/// cancelled. There is no mid-stream error frame.
pub async fn generate_campaign(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let sources = match state.sessions.sources_for_generation(&params.session_id) {
        Ok(sources) => sources,
        Err(err @ (StoreError::SessionNotFound | StoreError::NoSourcesConnected)) => {
            warn!(session_id = %params.session_id, "campaign generation rejected: {err}");
            return Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, err.to_string()));
        }
        Err(err) => {
            error!("session validation failed for '{}': {err}", params.session_id);
            return Err(ErrorResponse::reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
            ));
        }
    };

    let channels = params.channel_ids();
    let channel_refs: Vec<&str> = channels.iter().map(String::as_str).collect();
    let document = state
        .generator
        .generate(&sources, &params.campaign_type, &channel_refs);

    // Serialize once, up front. A non-serializable document is a generator
    // contract violation and must be surfaced before the channel opens.
    let serialized = match serde_json::to_string_pretty(&document) {
        Ok(serialized) => serialized,
        Err(err) => {
            error!(
                session_id = %params.session_id,
                "generated campaign document is not serializable: {err}"
            );
            return Err(ErrorResponse::reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to serialize campaign document",
            ));
        }
    };

    let connection_id = Uuid::new_v4();
    info!(
        %connection_id,
        session_id = %params.session_id,
        campaign_type = %params.campaign_type,
        channels = %params.channels,
        document_len = serialized.len(),
        "opening campaign stream"
    );

    let stream = campaign_stream(document, serialized, state.config.chunk_settings());
    let sse = Sse::new(stream).keep_alive(KeepAlive::default());
    Ok(([(header::CACHE_CONTROL, "no-cache")], sse))
}

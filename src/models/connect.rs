use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to connect a data source to a session
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub session_id: String,
    pub source: String,
}

/// Response after connecting a data source
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub success: bool,
    pub source_display_name: String,
    /// Canned sample of what the integration would return for this source.
    pub mock_payload: serde_json::Value,
    /// Display names of every source connected to the session, in the order
    /// they were first connected.
    pub connected_source_display_names: Vec<String>,
}

use axum::Json;

use crate::catalog;
use crate::models::{ChannelInfo, ChannelsResponse, DataSourceInfo, DataSourcesResponse};

/// List the data sources available for connection
pub async fn list_data_sources() -> Json<DataSourcesResponse> {
    Json(DataSourcesResponse {
        data_sources: catalog::DATA_SOURCES
            .iter()
            .map(|s| DataSourceInfo {
                id: s.id.to_string(),
                name: s.name.to_string(),
                description: s.description.to_string(),
            })
            .collect(),
    })
}

/// List the delivery channels a campaign can target
pub async fn list_channels() -> Json<ChannelsResponse> {
    Json(ChannelsResponse {
        channels: catalog::CHANNELS
            .iter()
            .map(|c| ChannelInfo {
                id: c.id.to_string(),
                name: c.name.to_string(),
                description: c.description.to_string(),
            })
            .collect(),
    })
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A connectable data source as shown to the client
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DataSourceInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Response listing the connectable data sources
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataSourcesResponse {
    pub data_sources: Vec<DataSourceInfo>,
}

/// A delivery channel as shown to the client
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Response listing the delivery channels
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelInfo>,
}

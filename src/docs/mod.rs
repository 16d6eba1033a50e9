use utoipa::OpenApi;

use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Connect a data source to a session
#[utoipa::path(
    post,
    path = "/connect",
    request_body = ConnectRequest,
    responses(
        (status = 200, description = "Data source connected", body = ConnectResponse),
        (status = 400, description = "Unknown data source", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn connect_doc() {}

/// List connectable data sources
#[utoipa::path(
    get,
    path = "/data-sources",
    responses(
        (status = 200, description = "Available data sources", body = DataSourcesResponse)
    )
)]
#[allow(dead_code)]
pub async fn data_sources_doc() {}

/// Stream a generated campaign
#[utoipa::path(
    get,
    path = "/generate-campaign",
    responses(
        (status = 200, description = "text/event-stream of CampaignFrame messages, ending with a terminal frame carrying the complete document"),
        (status = 400, description = "Unknown session or no sources connected", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn generate_campaign_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        connect_doc,
        data_sources_doc,
        generate_campaign_doc,
    ),
    components(
        schemas(
            HealthResponse,
            ConnectRequest,
            ConnectResponse,
            DataSourcesResponse,
            DataSourceInfo,
            ChannelsResponse,
            ChannelInfo,
            CampaignFrame,
            ErrorResponse
        )
    ),
    tags(
        (name = "api", description = "Campaign studio endpoints")
    )
)]
pub struct ApiDoc;

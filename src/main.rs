use axum::Router;
use std::panic;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use campaign_studio::config::Config;
use campaign_studio::docs::ApiDoc;
use campaign_studio::routes::create_api_routes;
use campaign_studio::state::AppState;

#[tokio::main]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "campaign_studio=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });
    let address = config.server_address();

    // Session store and campaign generator live in the injected state
    let state = AppState::new(config);

    // Combine all routes
    let app_routes = Router::new()
        // Mount API routes
        .merge(create_api_routes(state))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Browser demo client runs on a different origin
        .layer(CorsLayer::permissive())
        // Add tracing layer
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", address));

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger", address);

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}

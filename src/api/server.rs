//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::AnalysisEngine;
use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;

/// Assemble the application router with its middleware layers
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting TextScope API server...");

    // Analyzers are built once and shared by every request
    let engine = Arc::new(AnalysisEngine::from_config(config)?);
    info!(
        "🧠 Analysis engine ready (parallel: {}, timeout: {}s)",
        engine.options().parallel,
        engine.options().timeout.as_secs()
    );

    let app = build_router(AppState::new(engine), enable_cors);
    if enable_cors {
        info!("✅ CORS enabled");
    }

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /api/health         - Health check");
    info!("  POST /api/analyze        - Full analysis of one text");
    info!("  POST /api/batch-analyze  - Sentiment of several texts");

    axum::serve(listener, app).await?;

    Ok(())
}

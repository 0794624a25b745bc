pub mod f1_data;

use axum::{response::IntoResponse, routing::get, Json, Router};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::routes::f1_data::f1_data_routes;
use crate::utils::{config::Config, state::AppState};

pub fn make_app() -> (Router, String) {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME").replace('-', "_"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();

    info!("Initializing application...");
    let config = Config::init();
    info!("Configuration loaded successfully");

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/", get(health_check))
        .nest("/api/f1-data", f1_data_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    info!("Application initialized successfully");

    (app, bind_addr)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "Hello World"}))).into_response()
}

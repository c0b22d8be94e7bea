pub mod classify;
pub mod commands;
pub mod config;
pub mod shell;

use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use classify::{Classifier, GeminiClient, TextGenerator};
use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Classifier,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            classifier: Classifier::new(generator),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(grocery_ai::commands::CATEGORIZE_PATH, post(commands::categorize))
        .route("/health", get(commands::health))
        .layer(middleware::from_fn(shell::apply_cache_headers))
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> Result<(), String> {
    let gemini = GeminiClient::from_config(&config)?;
    let app = build_router(AppState::new(Arc::new(gemini)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", config.bind_addr, e))?;
    log::info!(
        "Grocery server listening on {} (model {})",
        config.bind_addr,
        config.model
    );
    if let Err(e) = rolling_logger::info(&format!("Server started on {}", config.bind_addr)) {
        log::warn!("Failed to write startup line to log file: {}", e);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

mod error;
mod handlers;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::monitor::Monitor;

#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<Monitor>,
}

/// Routes are served at the root and again under `/api`.
pub fn create_router(monitor: Arc<Monitor>) -> Router {
    let state = AppState { monitor };

    let routes = Router::new()
        .route("/jobs", get(handlers::list_jobs))
        .route("/jobs/refresh", post(handlers::refresh_jobs))
        .route("/health", get(handlers::health));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

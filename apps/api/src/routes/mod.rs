pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;

pub const ANALYZE_PATH: &str = "/api/v1/resume/analyze";

pub fn build_router(state: AppState) -> Router {
    // Rate limiting applies to the analyze route only.
    let analysis = Router::new()
        .route(ANALYZE_PATH, post(handlers::handle_analyze))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .merge(analysis)
        .with_state(state)
}

use std::sync::Arc;

use crate::analysis::extractor::TextExtractor;
use crate::config::Config;
use crate::llm_client::LlmBackend;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model client built once at startup. Tests swap in a fake.
    pub llm: Arc<dyn LlmBackend>,
    pub extractor: TextExtractor,
    pub rate_limiter: RateLimiter,
}

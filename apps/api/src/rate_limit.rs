//! Fixed-window rate limiting keyed by client address.
//!
//! State is process-wide and shared by every in-flight request, so each
//! check takes the lock for the whole read-modify-write.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::state::AppState;

const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

#[derive(Debug, PartialEq)]
pub enum RateLimitResult {
    Allowed,
    Limited { retry_after: u64 },
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, WindowState>>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        info!(
            limit,
            window_secs = window.as_secs(),
            "Initializing rate limiter"
        );
        Self {
            limit,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Counts one request against `key`'s current window.
    pub async fn check(&self, key: &str) -> RateLimitResult {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let state = windows.entry(key.to_string()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now.duration_since(state.window_start) >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.limit {
            let elapsed = now.duration_since(state.window_start);
            let remaining = self.window.saturating_sub(elapsed);
            return RateLimitResult::Limited {
                retry_after: remaining.as_secs().max(1),
            };
        }

        state.count += 1;
        RateLimitResult::Allowed
    }

    /// Drops windows that have fully elapsed.
    pub async fn cleanup_expired(&self) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, state| now.duration_since(state.window_start) < self.window);
        debug!(
            removed = before - windows.len(),
            "Cleaned up expired rate limit windows"
        );
    }

    pub fn rejection_message(&self) -> String {
        format!(
            "Rate limit exceeded: {} per {} seconds",
            self.limit,
            self.window.as_secs()
        )
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Resolves the limiter key for a request. Proxy headers are only honoured
/// when the service is configured to sit behind a trusted proxy.
fn client_key(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_proxy_headers: bool,
) -> String {
    if trust_proxy_headers {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    connect_info
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Route layer for rate-limited endpoints. Runs before body extraction, so
/// rejected requests are never parsed.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(
        request.headers(),
        connect_info.as_ref(),
        state.config.trust_proxy_headers,
    );

    match state.rate_limiter.check(&key).await {
        RateLimitResult::Allowed => {
            debug!(client = %key, path = %request.uri().path(), "Request allowed by rate limiter");
            Ok(next.run(request).await)
        }
        RateLimitResult::Limited { retry_after } => {
            warn!(
                client = %key,
                path = %request.uri().path(),
                retry_after,
                "Request blocked by rate limiter"
            );
            Err(AppError::RateLimited {
                message: state.rate_limiter.rejection_message(),
                retry_after,
            })
        }
    }
}

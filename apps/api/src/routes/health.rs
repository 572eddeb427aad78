use axum::Json;

use crate::models::health::{HealthCheckResponse, WelcomeResponse};

pub const SERVICE_NAME: &str = "Recruiter First API";

/// GET /
/// Returns service identity and the list of available endpoints.
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "AI-powered resume analysis API that matches resumes against job \
            descriptions to provide insights, match scores, and recommendations."
            .to_string(),
        endpoints: vec![
            "GET /health - Health check endpoint".to_string(),
            "POST /api/v1/resume/analyze - Analyze resume against job description".to_string(),
        ],
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        message: "Service is running".to_string(),
    })
}

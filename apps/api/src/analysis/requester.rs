//! Analysis Requester — one structured-output call to the model per request.

use serde_json::{json, Value};
use tracing::debug;

use crate::llm_client::{LlmBackend, LlmError};

/// Structured-output schema sent alongside every analysis prompt.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "match_score": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "gaps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["match_score", "summary", "strengths", "gaps", "recommendations"],
        "propertyOrdering": ["match_score", "summary", "strengths", "gaps", "recommendations"]
    })
}

/// Sends the prompt and returns the raw response text. No retries.
pub async fn request_analysis(llm: &dyn LlmBackend, prompt: &str) -> Result<String, LlmError> {
    debug!(model = llm.model(), prompt_chars = prompt.len(), "Requesting analysis");
    llm.generate_json(prompt, &analysis_schema()).await
}

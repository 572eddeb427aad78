//! Analysis pipeline: extract → prompt → request → parse.
//!
//! Only extraction can fail. Upstream and decode failures are absorbed into a
//! degraded `AnalysisResult` so every call that reaches the model returns a
//! well-formed result.

use std::io::Cursor;

use bytes::Bytes;
use tracing::{info, warn};

use crate::analysis::extractor::{ExtractionError, TextExtractor};
use crate::analysis::parser::parse_analysis;
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::requester::request_analysis;
use crate::llm_client::LlmBackend;
use crate::models::analysis::AnalysisResult;

pub const UPSTREAM_ERROR_PREFIX: &str = "Error during analysis";

/// Runs the full pipeline for one uploaded resume.
pub async fn analyze_resume(
    extractor: &TextExtractor,
    llm: &dyn LlmBackend,
    resume: Bytes,
    job_description: &str,
) -> Result<AnalysisResult, ExtractionError> {
    let resume_text = extract_off_thread(extractor.clone(), resume).await?;
    info!(resume_chars = resume_text.len(), "Resume text extracted");

    let prompt = build_analysis_prompt(&resume_text, job_description);

    let raw = match request_analysis(llm, &prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Model call failed, returning degraded result: {e}");
            return Ok(AnalysisResult::degraded(format!(
                "{UPSTREAM_ERROR_PREFIX}: {e}"
            )));
        }
    };

    let result = parse_analysis(&raw);
    info!(match_score = result.match_score(), "Analysis complete");
    Ok(result)
}

/// PDF parsing is CPU-bound, so it runs on the blocking pool.
async fn extract_off_thread(
    extractor: TextExtractor,
    resume: Bytes,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extractor.extract(&mut Cursor::new(resume)))
        .await
        .map_err(|e| ExtractionError::Parse(format!("PDF parser aborted: {e}")))?
}

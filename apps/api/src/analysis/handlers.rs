//! Axum route handler for the Analysis API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::service::analyze_resume;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
/// Compared case-sensitively: `resume.PDF` is rejected.
pub const PDF_EXTENSION: &str = ".pdf";

/// Fields of the analyze form after structural checks.
#[derive(Debug)]
struct AnalyzeForm {
    filename: Option<String>,
    resume: Bytes,
    job_description: String,
}

/// POST /api/v1/resume/analyze
///
/// Multipart form with `resume` (PDF file) and `job_description` (text).
/// Validation happens before any extraction or model work.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let multipart = multipart.map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;
    let form = read_form(multipart, state.config.max_upload_bytes).await?;

    validate_filename(form.filename.as_deref())?;
    validate_job_description(&form.job_description)?;

    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", %analysis_id);

    async move {
        info!(
            filename = form.filename.as_deref().unwrap_or_default(),
            resume_bytes = form.resume.len(),
            job_description_chars = form.job_description.len(),
            "Analyzing resume"
        );

        analyze_resume(
            &state.extractor,
            state.llm.as_ref(),
            form.resume,
            &form.job_description,
        )
        .await
        .map(Json)
        .map_err(|e| AppError::Internal(e.into()))
    }
    .instrument(span)
    .await
}

async fn read_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<AnalyzeForm, AppError> {
    let to_app_error = |e| multipart_error(e, max_upload_bytes);
    let mut resume: Option<(Option<String>, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(to_app_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let filename = field.file_name().map(String::from);
                let data = field.bytes().await.map_err(to_app_error)?;
                resume = Some((filename, data));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = Some(field.text().await.map_err(to_app_error)?);
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let (filename, resume) = resume.ok_or_else(|| missing_field(RESUME_FIELD))?;
    let job_description = job_description.ok_or_else(|| missing_field(JOB_DESCRIPTION_FIELD))?;

    Ok(AnalyzeForm {
        filename,
        resume,
        job_description,
    })
}

fn missing_field(name: &str) -> AppError {
    AppError::UnprocessableEntity(format!("Missing required form field: {name}"))
}

fn multipart_error(
    e: axum::extract::multipart::MultipartError,
    max_upload_bytes: usize,
) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the {max_upload_bytes}-byte limit"))
    } else {
        AppError::Validation(format!("Invalid multipart form data: {}", e.body_text()))
    }
}

fn validate_filename(filename: Option<&str>) -> Result<(), AppError> {
    match filename {
        Some(name) if name.ends_with(PDF_EXTENSION) => Ok(()),
        _ => Err(AppError::Validation(
            "Invalid file format. Please upload a PDF file.".to_string(),
        )),
    }
}

fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

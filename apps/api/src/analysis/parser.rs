//! Response Parser — maps model output onto `AnalysisResult`.
//!
//! The text is decoded into a loose `serde_json` map first and then read
//! field by field with defaults, so a missing key never fails the request.
//! Anything that cannot be used becomes a degraded result; this module never
//! returns an error.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm_client::prompts::strip_json_fences;
use crate::models::analysis::{AnalysisResult, ScoreOutOfRange};

pub const PARSE_ERROR_PREFIX: &str = "Error parsing AI response";

#[derive(Debug, Error)]
enum ParseFailure {
    #[error("empty response from model")]
    Empty,

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' has the wrong type: expected {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Score(#[from] ScoreOutOfRange),
}

/// Parses raw model text. Unusable text yields a degraded result whose
/// summary starts with [`PARSE_ERROR_PREFIX`].
pub fn parse_analysis(raw: &str) -> AnalysisResult {
    match try_parse(raw) {
        Ok(result) => result,
        Err(failure) => {
            tracing::warn!("Degrading analysis result: {failure}");
            AnalysisResult::degraded(format!("{PARSE_ERROR_PREFIX}: {failure}"))
        }
    }
}

fn try_parse(raw: &str) -> Result<AnalysisResult, ParseFailure> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let value: Value = serde_json::from_str(text)?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => return Err(ParseFailure::NotAnObject(type_name(&other))),
    };

    let result = AnalysisResult::new(
        read_score(&fields)?,
        read_string(&fields, "summary")?,
        read_list(&fields, "strengths")?,
        read_list(&fields, "gaps")?,
        read_list(&fields, "recommendations")?,
    )?;
    Ok(result)
}

/// Missing or null scores default to 0. Numeric strings are accepted.
fn read_score(fields: &Map<String, Value>) -> Result<f64, ParseFailure> {
    match fields.get("match_score") {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or(ParseFailure::WrongType {
            field: "match_score",
            expected: "number",
            found: "number",
        }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| ParseFailure::WrongType {
            field: "match_score",
            expected: "number",
            found: "non-numeric string",
        }),
        Some(other) => Err(ParseFailure::WrongType {
            field: "match_score",
            expected: "number",
            found: type_name(other),
        }),
    }
}

fn read_string(fields: &Map<String, Value>, field: &'static str) -> Result<String, ParseFailure> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ParseFailure::WrongType {
            field,
            expected: "string",
            found: type_name(other),
        }),
    }
}

/// Missing or null lists default to empty; non-string elements are dropped.
fn read_list(fields: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, ParseFailure> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect()),
        Some(other) => Err(ParseFailure::WrongType {
            field,
            expected: "array",
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

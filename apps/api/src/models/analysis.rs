use serde::Serialize;
use thiserror::Error;

pub const MIN_MATCH_SCORE: f64 = 0.0;
pub const MAX_MATCH_SCORE: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
#[error("match_score must be between 0 and 100, got {0}")]
pub struct ScoreOutOfRange(pub f64);

/// Structured match assessment returned by `POST /api/v1/resume/analyze`.
///
/// `match_score` is only settable through [`AnalysisResult::new`], which
/// rejects anything outside `[0, 100]` (including NaN).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    match_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn new(
        match_score: f64,
        summary: String,
        strengths: Vec<String>,
        gaps: Vec<String>,
        recommendations: Vec<String>,
    ) -> Result<Self, ScoreOutOfRange> {
        if !(MIN_MATCH_SCORE..=MAX_MATCH_SCORE).contains(&match_score) {
            return Err(ScoreOutOfRange(match_score));
        }
        Ok(Self {
            match_score,
            summary,
            strengths,
            gaps,
            recommendations,
        })
    }

    /// Low-confidence result used in place of a hard failure when the
    /// model's output could not be used.
    pub fn degraded(summary: impl Into<String>) -> Self {
        Self {
            match_score: 0.0,
            summary: summary.into(),
            strengths: Vec::new(),
            gaps: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn match_score(&self) -> f64 {
        self.match_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(score: f64) -> Result<AnalysisResult, ScoreOutOfRange> {
        AnalysisResult::new(
            score,
            "Good fit".to_string(),
            vec!["Python".to_string()],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_accepts_bounds() {
        assert_eq!(build(0.0).unwrap().match_score(), 0.0);
        assert_eq!(build(100.0).unwrap().match_score(), 100.0);
        assert_eq!(build(75.5).unwrap().match_score(), 75.5);
    }

    #[test]
    fn test_rejects_above_100() {
        assert_eq!(build(101.0).unwrap_err(), ScoreOutOfRange(101.0));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(build(-1.0).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        assert!(build(f64::NAN).is_err());
    }

    #[test]
    fn test_degraded_has_zero_score_and_empty_lists() {
        let result = AnalysisResult::degraded("Error parsing AI response: oops");
        assert_eq!(result.match_score(), 0.0);
        assert!(result.summary.contains("Error parsing"));
        assert!(result.strengths.is_empty());
        assert!(result.gaps.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_serializes_all_fields() {
        let json = serde_json::to_value(build(90.0).unwrap()).unwrap();
        assert_eq!(json["match_score"], 90.0);
        assert_eq!(json["summary"], "Good fit");
        assert_eq!(json["strengths"][0], "Python");
        assert!(json["gaps"].as_array().unwrap().is_empty());
        assert!(json["recommendations"].as_array().unwrap().is_empty());
    }
}

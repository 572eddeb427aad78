// Prompt for the resume / job description comparison.
// The builder is a pure function: identical inputs always yield an identical prompt.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Role statement that opens every analysis prompt.
pub const ANALYSIS_ROLE: &str = "You are an expert recruiter and career coach. \
    Compare the candidate's resume against the job description and assess how well \
    the candidate fits the role.";

/// Output shape the model must follow. Mirrors `requester::analysis_schema`.
pub const ANALYSIS_OUTPUT_SHAPE: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": <number between 0 and 100>,
  "summary": "<2-3 sentence overview of the candidate's fit>",
  "strengths": ["<strength that is relevant to the role>"],
  "gaps": ["<required skill or experience the resume does not show>"],
  "recommendations": ["<concrete action the candidate could take to improve the match>"]
}"#;

/// Builds the analysis prompt embedding both inputs verbatim.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{ANALYSIS_ROLE}\n\n\
         RESUME:\n{resume_text}\n\n\
         JOB DESCRIPTION:\n{job_description}\n\n\
         {ANALYSIS_OUTPUT_SHAPE}\n\n\
         {JSON_ONLY_INSTRUCTION}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "John Doe\nSenior Software Engineer\n- Developed Python applications using FastAPI";
    const JD: &str = "Senior Python Developer\nRequirements:\n- 5+ years of Python";

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_analysis_prompt(RESUME, JD),
            build_analysis_prompt(RESUME, JD)
        );
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = build_analysis_prompt(RESUME, JD);
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JD));
    }

    #[test]
    fn test_prompt_names_every_output_field() {
        let prompt = build_analysis_prompt(RESUME, JD);
        for field in ["match_score", "summary", "strengths", "gaps", "recommendations"] {
            assert!(prompt.contains(field), "missing field {field}");
        }
        assert!(prompt.starts_with("You are an expert recruiter"));
        assert!(prompt.trim_end().ends_with("Do NOT use markdown code fences."));
    }

    #[test]
    fn test_placeholders_in_inputs_are_not_expanded() {
        let prompt = build_analysis_prompt("{job_description}", "{resume_text}");
        assert!(prompt.contains("RESUME:\n{job_description}"));
        assert!(prompt.contains("JOB DESCRIPTION:\n{resume_text}"));
    }

    #[test]
    fn test_different_inputs_give_different_prompts() {
        assert_ne!(
            build_analysis_prompt(RESUME, JD),
            build_analysis_prompt(RESUME, "Need a Rust engineer")
        );
    }
}

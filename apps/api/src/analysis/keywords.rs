//! Keyword analysis: LLM extraction of JD keywords and coverage scoring of a
//! generated text against them.
//!
//! Coverage is a stable partition of the keyword list, so each bucket keeps
//! the model-reported importance order:
//! - covered: the whole keyword occurs (case-insensitive substring)
//! - partial: not covered, but one whitespace-delimited token of it occurs
//! - missing: neither

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::prompts::{
    KEYWORD_MAX_TOKENS, KEYWORD_MODEL, KEYWORD_PROMPT_TEMPLATE, KEYWORD_TEMPERATURE,
};
use crate::analysis::round_to;
use crate::llm_client::prompts::RECRUITER_SYSTEM;
use crate::llm_client::{CompletionRequest, LlmError, LlmProvider};

/// Characters stripped from both ends of each extracted keyword.
const KEYWORD_TRIM_CHARS: &[char] = &['.', ',', '·'];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    pub covered: Vec<String>,
    pub partial_matches: Vec<String>,
    pub missing: Vec<String>,
    /// Percent of keywords fully matched, one decimal.
    pub coverage: f64,
    /// Percent of keywords partially matched, one decimal.
    pub partial_coverage: f64,
    /// coverage + 0.5 * partial_coverage
    pub total_coverage: f64,
}

impl CoverageResult {
    /// Result for an empty draft or keyword list: everything missing, all zero.
    pub fn empty(keywords: &[String]) -> Self {
        Self {
            missing: keywords.to_vec(),
            ..Default::default()
        }
    }
}

/// Builds the extraction prompt for a JD.
pub fn build_keyword_prompt(text: &str, top_k: usize) -> String {
    KEYWORD_PROMPT_TEMPLATE
        .replace("{top_k}", &top_k.to_string())
        .replace("{text}", text)
}

/// Splits a comma-separated model response into at most `top_k` keywords.
pub fn parse_keyword_response(response: &str, top_k: usize) -> Vec<String> {
    response
        .split(',')
        .map(|kw| kw.trim().trim_matches(KEYWORD_TRIM_CHARS))
        .filter(|kw| !kw.is_empty())
        .take(top_k)
        .map(str::to_string)
        .collect()
}

/// Extracts importance-ordered keywords from a job description.
///
/// Blank input returns an empty list without calling the provider.
pub async fn extract_keywords(
    text: &str,
    top_k: usize,
    llm: &dyn LlmProvider,
) -> Result<Vec<String>, LlmError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let request = CompletionRequest::new(
        KEYWORD_MODEL,
        RECRUITER_SYSTEM,
        build_keyword_prompt(text, top_k),
        KEYWORD_TEMPERATURE,
        KEYWORD_MAX_TOKENS,
    );
    let response = llm.complete(request).await?;
    let keywords = parse_keyword_response(&response, top_k);
    debug!("Extracted {} keywords (top_k={top_k})", keywords.len());
    Ok(keywords)
}

/// Scores how many keywords a text covers.
pub fn analyze_coverage(draft: &str, keywords: &[String]) -> CoverageResult {
    if draft.is_empty() || keywords.is_empty() {
        return CoverageResult::empty(keywords);
    }

    let draft_lower = draft.to_lowercase();
    let mut covered = Vec::new();
    let mut partial_matches = Vec::new();
    let mut missing = Vec::new();

    for keyword in keywords {
        let kw_lower = keyword.to_lowercase();
        if draft_lower.contains(&kw_lower) {
            covered.push(keyword.clone());
        } else if kw_lower
            .split_whitespace()
            .any(|token| draft_lower.contains(token))
        {
            partial_matches.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let total = keywords.len() as f64;
    let coverage = round_to(100.0 * covered.len() as f64 / total, 1);
    let partial_coverage = round_to(100.0 * partial_matches.len() as f64 / total, 1);

    CoverageResult {
        covered,
        partial_matches,
        missing,
        coverage,
        partial_coverage,
        total_coverage: coverage + partial_coverage * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailingLlm, RecordingLlm};
    use crate::llm_client::LlmErrorKind;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coverage_exact_and_missing() {
        let keywords = kws(&["AWS", "Docker", "팀워크"]);
        let r = analyze_coverage("AWS와 Docker 경험이 있습니다", &keywords);
        assert_eq!(r.covered, kws(&["AWS", "Docker"]));
        assert_eq!(r.missing, kws(&["팀워크"]));
        assert!(r.partial_matches.is_empty());
        assert_eq!(r.coverage, 66.7);
        assert_eq!(r.partial_coverage, 0.0);
        assert_eq!(r.total_coverage, 66.7);
    }

    #[test]
    fn test_coverage_exact_tie_rounds_to_even() {
        let keywords: Vec<String> = (0..16).map(|i| format!("kw{i:02}")).collect();
        let r = analyze_coverage("only kw00 appears", &keywords);
        assert_eq!(r.covered, kws(&["kw00"]));
        assert_eq!(r.coverage, 6.2);
    }

    #[test]
    fn test_coverage_is_case_insensitive() {
        let r = analyze_coverage("experience with aws and KUBERNETES", &kws(&["AWS", "Kubernetes"]));
        assert_eq!(r.covered.len(), 2);
        assert_eq!(r.coverage, 100.0);
    }

    #[test]
    fn test_coverage_partial_token_match() {
        let keywords = kws(&["데이터 분석", "머신 러닝", "Rust"]);
        let r = analyze_coverage("데이터 기반으로 일했습니다", &keywords);
        assert!(r.covered.is_empty());
        assert_eq!(r.partial_matches, kws(&["데이터 분석"]));
        assert_eq!(r.missing, kws(&["머신 러닝", "Rust"]));
        assert_eq!(r.partial_coverage, 33.3);
        assert!((r.total_coverage - 16.65).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_preserves_keyword_order() {
        let keywords = kws(&["z", "a", "m", "b"]);
        let r = analyze_coverage("b z", &keywords);
        assert_eq!(r.covered, kws(&["z", "b"]));
        assert_eq!(r.missing, kws(&["a", "m"]));
    }

    #[test]
    fn test_coverage_empty_inputs() {
        let keywords = kws(&["AWS"]);
        let r = analyze_coverage("", &keywords);
        assert_eq!(r, CoverageResult::empty(&keywords));
        assert_eq!(r.missing, keywords);
        assert_eq!(r.coverage, 0.0);

        let r = analyze_coverage("some text", &[]);
        assert!(r.missing.is_empty());
        assert_eq!(r.total_coverage, 0.0);
    }

    #[test]
    fn test_parse_strips_punctuation_and_whitespace() {
        let parsed = parse_keyword_response(" Python, AWS., ·SQL·, , 협업 능력.", 20);
        assert_eq!(parsed, kws(&["Python", "AWS", "SQL", "협업 능력"]));
    }

    #[test]
    fn test_parse_drops_tokens_that_become_empty() {
        let parsed = parse_keyword_response("Python, ., ·, Go", 20);
        assert_eq!(parsed, kws(&["Python", "Go"]));
    }

    #[test]
    fn test_parse_truncates_to_top_k() {
        let parsed = parse_keyword_response("a, b, c, d, e", 3);
        assert_eq!(parsed, kws(&["a", "b", "c"]));
    }

    #[test]
    fn test_prompt_embeds_top_k_and_text() {
        let prompt = build_keyword_prompt("백엔드 개발자 채용", 15);
        assert!(prompt.contains("최대 15개"));
        assert!(prompt.contains("백엔드 개발자 채용"));
        assert!(!prompt.contains("{text}"));
    }

    #[tokio::test]
    async fn test_extract_keywords_blank_text_makes_no_call() {
        let llm = RecordingLlm::new(&["should not be used"]);
        assert!(extract_keywords("", 20, &llm).await.unwrap().is_empty());
        assert!(extract_keywords("  \n ", 20, &llm).await.unwrap().is_empty());
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_extract_keywords_uses_fixed_sampling() {
        let llm = RecordingLlm::new(&["Python, SQL, 커뮤니케이션"]);
        let keywords = extract_keywords("데이터 엔지니어 채용 공고", 20, &llm)
            .await
            .unwrap();
        assert_eq!(keywords, kws(&["Python", "SQL", "커뮤니케이션"]));

        let req = llm.request(0);
        assert_eq!(req.model, KEYWORD_MODEL);
        assert!((req.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(req.max_tokens, 400);
        assert_eq!(req.messages[0].content, RECRUITER_SYSTEM);
        assert!(req.user_prompt().unwrap().contains("데이터 엔지니어 채용 공고"));
    }

    #[tokio::test]
    async fn test_extract_keywords_propagates_failure_kind() {
        let llm = FailingLlm::new(LlmErrorKind::RateLimited);
        let err = extract_keywords("JD", 20, &llm).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::RateLimited);
        assert_eq!(llm.calls(), 1);
    }
}

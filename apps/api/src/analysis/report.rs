//! Combined quality report for a session's final text.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::CoverageResult;
use crate::analysis::text::{
    analyze_readability, count_korean_chars, detect_cliche_advanced, ClicheResult,
    ReadabilityResult,
};
use crate::models::project::ProjectState;

/// Hangul lengths of draft and refined text, with their differences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthReport {
    pub draft_chars: Option<usize>,
    pub refined_chars: Option<usize>,
    pub target_len: u32,
    /// refined − draft, when both exist.
    pub refined_minus_draft: Option<i64>,
    /// refined − target, when refined exists.
    pub refined_minus_target: Option<i64>,
}

/// Readability and cliché figures for an arbitrary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextReport {
    pub korean_chars: usize,
    pub readability: ReadabilityResult,
    pub cliche: ClicheResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub lengths: LengthReport,
    /// Statistics over the refined text if present, else the draft.
    pub text: TextReport,
    pub keywords: Option<Vec<String>>,
    pub coverage: Option<CoverageResult>,
}

pub fn analyze_text(text: &str) -> TextReport {
    TextReport {
        korean_chars: count_korean_chars(text),
        readability: analyze_readability(text),
        cliche: detect_cliche_advanced(text),
    }
}

pub fn length_report(project: &ProjectState) -> LengthReport {
    let draft_chars = project.draft.as_deref().map(count_korean_chars);
    let refined_chars = project.refined.as_deref().map(count_korean_chars);
    let target_len = project.settings.target_len;

    LengthReport {
        draft_chars,
        refined_chars,
        target_len,
        refined_minus_draft: draft_chars
            .zip(refined_chars)
            .map(|(d, r)| r as i64 - d as i64),
        refined_minus_target: refined_chars.map(|r| r as i64 - target_len as i64),
    }
}

/// `None` until the session has a draft.
pub fn build_report(project: &ProjectState) -> Option<AnalysisReport> {
    let text = project.final_text()?;
    Some(AnalysisReport {
        lengths: length_report(project),
        text: analyze_text(text),
        keywords: project.keywords.clone(),
        coverage: project.coverage.clone(),
    })
}

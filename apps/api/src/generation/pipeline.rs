//! Wizard pipeline: runs generation stages against an explicit `ProjectState`.
//!
//! Flow: draft → refine → keywords (+ coverage on the final text).
//!
//! Failure policy:
//! - draft failure: returned as an error, `draft` untouched. `run_all` stops.
//! - refine / keyword failure: recorded as a `StepFailure`, field untouched,
//!   the run continues.
//! - a stage whose prerequisite is missing is skipped, not an error.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::keywords::{analyze_coverage, extract_keywords};
use crate::analysis::prompts::DEFAULT_TOP_K;
use crate::generation::generator::{generate_draft, refine_text};
use crate::llm_client::{LlmError, LlmErrorKind, LlmProvider};
use crate::models::project::{ProjectState, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Draft,
    Refine,
    Keywords,
    /// The résumé flow's cover letter; not part of the wizard.
    ResumeCoverLetter,
}

/// A recoverable stage failure shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: Step,
    pub kind: LlmErrorKind,
    pub message: String,
}

impl StepFailure {
    pub fn new(step: Step, err: &LlmError) -> Self {
        Self {
            step,
            kind: err.kind,
            message: err.message.clone(),
        }
    }
}

/// Outcome of running a single stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    Failed(StepFailure),
}

/// What a run did, returned to the caller alongside the updated state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub stage: Stage,
    pub completed: Vec<Step>,
    pub skipped: Vec<Step>,
    pub failures: Vec<StepFailure>,
}

impl PipelineReport {
    fn new() -> Self {
        Self {
            stage: Stage::Empty,
            completed: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn record(&mut self, step: Step, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Completed => self.completed.push(step),
            StepOutcome::Skipped => self.skipped.push(step),
            StepOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    fn finish(mut self, project: &ProjectState) -> Self {
        self.stage = project.stage();
        self
    }
}

/// Generates the draft and stamps the project's timestamp.
pub async fn run_draft(project: &mut ProjectState, llm: &dyn LlmProvider) -> Result<(), LlmError> {
    let draft = generate_draft(project, llm).await?;
    project.draft = Some(draft);
    project.timestamp = Some(Utc::now());
    Ok(())
}

/// Refines the current draft. Skipped when there is no draft yet.
pub async fn run_refine(project: &mut ProjectState, llm: &dyn LlmProvider) -> StepOutcome {
    let Some(draft) = project.draft.clone() else {
        return StepOutcome::Skipped;
    };

    match refine_text(&draft, project, llm).await {
        Ok(refined) => {
            project.refined = Some(refined);
            StepOutcome::Completed
        }
        Err(e) => {
            warn!("Refine step failed ({:?}): {}", e.kind, e.message);
            StepOutcome::Failed(StepFailure::new(Step::Refine, &e))
        }
    }
}

/// Extracts JD keywords and, when a final text exists, scores coverage.
/// Skipped when the JD text is blank.
pub async fn run_keywords(project: &mut ProjectState, llm: &dyn LlmProvider) -> StepOutcome {
    if project.jd_text.trim().is_empty() {
        return StepOutcome::Skipped;
    }

    let keywords = match extract_keywords(&project.jd_text, DEFAULT_TOP_K, llm).await {
        Ok(keywords) => keywords,
        Err(e) => {
            warn!("Keyword extraction failed ({:?}): {}", e.kind, e.message);
            let e = LlmError::new(e.kind, format!("키워드 추출 실패: {}", e.message));
            return StepOutcome::Failed(StepFailure::new(Step::Keywords, &e));
        }
    };

    if let Some(text) = project.final_text() {
        let coverage = analyze_coverage(text, &keywords);
        info!(
            "Keyword coverage: {:.1}% exact, {:.1}% partial of {} keywords",
            coverage.coverage,
            coverage.partial_coverage,
            keywords.len()
        );
        project.coverage = Some(coverage);
    }
    project.keywords = Some(keywords);
    StepOutcome::Completed
}

/// Single draft stage wrapped as a report.
pub async fn run_draft_step(
    project: &mut ProjectState,
    llm: &dyn LlmProvider,
) -> Result<PipelineReport, LlmError> {
    run_draft(project, llm).await?;
    let mut report = PipelineReport::new();
    report.record(Step::Draft, StepOutcome::Completed);
    Ok(report.finish(project))
}

/// Runs one wizard stage and wraps the outcome as a report.
pub async fn run_single(
    step: Step,
    project: &mut ProjectState,
    llm: &dyn LlmProvider,
) -> Result<PipelineReport, LlmError> {
    let outcome = match step {
        Step::Draft => return run_draft_step(project, llm).await,
        Step::Refine => run_refine(project, llm).await,
        Step::Keywords => run_keywords(project, llm).await,
        Step::ResumeCoverLetter => StepOutcome::Skipped,
    };
    let mut report = PipelineReport::new();
    report.record(step, outcome);
    Ok(report.finish(project))
}

/// Draft → refine → keywords. A draft failure aborts the run.
pub async fn run_all(
    project: &mut ProjectState,
    llm: &dyn LlmProvider,
) -> Result<PipelineReport, LlmError> {
    let mut report = PipelineReport::new();

    run_draft(project, llm).await?;
    report.record(Step::Draft, StepOutcome::Completed);

    let outcome = run_refine(project, llm).await;
    report.record(Step::Refine, outcome);

    let outcome = run_keywords(project, llm).await;
    report.record(Step::Keywords, outcome);

    info!(
        "Full run finished: {} completed, {} failed",
        report.completed.len(),
        report.failures.len()
    );
    Ok(report.finish(project))
}

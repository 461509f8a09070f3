//! Axum route handler for the résumé flow.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::pipeline::{Step, StepFailure};
use crate::llm_client::prompts::RESUME_ASSISTANT_SYSTEM;
use crate::llm_client::{CompletionRequest, LlmError, LlmProvider};
use crate::resume::profile::{build_resume_cover_letter_prompt, render_resume_markdown, ResumeProfile};
use crate::resume::prompts::{
    RESUME_COVER_LETTER_MAX_TOKENS, RESUME_COVER_LETTER_MODEL, RESUME_COVER_LETTER_TEMPERATURE,
};
use crate::search::reputation::{fetch_reputation, DEFAULT_MAX_RESULTS};
use crate::search::SearchHit;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume_markdown: String,
    pub cover_letter: Option<String>,
    /// Set when the cover letter call failed; the rest of the response is still valid.
    pub cover_letter_failure: Option<StepFailure>,
    /// False when no name was given and the lookup was not attempted.
    pub reputation_searched: bool,
    pub reputation: Vec<SearchHit>,
}

/// Drafts a cover letter from the rendered résumé.
pub async fn generate_resume_cover_letter(
    profile: &ResumeProfile,
    resume_md: &str,
    llm: &dyn LlmProvider,
) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        RESUME_COVER_LETTER_MODEL,
        RESUME_ASSISTANT_SYSTEM,
        build_resume_cover_letter_prompt(profile, resume_md),
        RESUME_COVER_LETTER_TEMPERATURE,
        RESUME_COVER_LETTER_MAX_TOKENS,
    );
    let text = llm.complete(request).await?;
    Ok(text.trim().to_string())
}

/// POST /api/v1/resume
///
/// Résumé Markdown → cover letter → reputation lookup. A missing API key
/// blocks the whole request; a failed LLM call does not.
pub async fn handle_resume(
    State(state): State<AppState>,
    Json(profile): Json<ResumeProfile>,
) -> Result<Json<ResumeResponse>, AppError> {
    let llm = state.require_llm()?;

    let resume_markdown = render_resume_markdown(&profile);

    let (cover_letter, cover_letter_failure) =
        match generate_resume_cover_letter(&profile, &resume_markdown, llm.as_ref()).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                warn!("Résumé cover letter failed ({:?}): {}", e.kind, e.message);
                (None, Some(StepFailure::new(Step::ResumeCoverLetter, &e)))
            }
        };

    let reputation_searched = !profile.name.trim().is_empty();
    let reputation = fetch_reputation(&profile.name, state.search.as_ref(), DEFAULT_MAX_RESULTS).await;

    info!(
        "Résumé flow done: cover_letter={}, reputation_hits={}",
        cover_letter.is_some(),
        reputation.len()
    );

    Ok(Json(ResumeResponse {
        resume_markdown,
        cover_letter,
        cover_letter_failure,
        reputation_searched,
        reputation,
    }))
}

//! Axum route handlers for sessions and the generation stages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::{run_all, run_single, PipelineReport, Step};
use crate::models::project::{GenerationSettings, InputPatch, ProjectState, Stage};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub settings: Option<GenerationSettings>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub stage: Stage,
    pub project: ProjectState,
}

impl SessionResponse {
    fn new(session_id: Uuid, project: ProjectState) -> Self {
        Self {
            session_id,
            stage: project.stage(),
            project,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub session_id: Uuid,
    pub report: PipelineReport,
    pub project: ProjectState,
}

// ────────────────────────────────────────────────────────────────────────────
// Session handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let settings = body
        .and_then(|Json(req)| req.settings)
        .unwrap_or_default();
    settings.validate()?;

    let (id, project) = state.sessions.create(settings).await;
    tracing::info!("Session {id} created");
    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, project))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let project = state.sessions.get(id).await?;
    Ok(Json(SessionResponse::new(id, project)))
}

/// PUT /api/v1/sessions/:id/inputs
pub async fn handle_update_inputs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<InputPatch>,
) -> Result<Json<SessionResponse>, AppError> {
    let project = state.sessions.update_inputs(id, patch).await?;
    Ok(Json(SessionResponse::new(id, project)))
}

/// PUT /api/v1/sessions/:id/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<GenerationSettings>,
) -> Result<Json<SessionResponse>, AppError> {
    let project = state.sessions.update_settings(id, settings).await?;
    Ok(Json(SessionResponse::new(id, project)))
}

/// POST /api/v1/sessions/:id/reset
///
/// Full restart: clears inputs and every generated field, keeps settings.
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let project = state.sessions.reset(id).await?;
    Ok(Json(SessionResponse::new(id, project)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Generation stage handlers
// ────────────────────────────────────────────────────────────────────────────

enum Run {
    Single(Step),
    All,
}

/// Shared body of every stage endpoint: check credential and inputs, then run
/// the stage while holding the session lock. Edits sent meanwhile wait for it.
async fn run_stage(state: &AppState, id: Uuid, run: Run) -> Result<Json<StageResponse>, AppError> {
    let llm = state.require_llm()?;
    let mut session = state.sessions.lock(id).await?;
    session.validate_inputs()?;

    let report = match run {
        Run::Single(step) => run_single(step, &mut session, llm.as_ref()).await?,
        Run::All => run_all(&mut session, llm.as_ref()).await?,
    };

    Ok(Json(StageResponse {
        session_id: id,
        report,
        project: (*session).clone(),
    }))
}

/// POST /api/v1/sessions/:id/draft
pub async fn handle_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResponse>, AppError> {
    run_stage(&state, id, Run::Single(Step::Draft)).await
}

/// POST /api/v1/sessions/:id/refine
pub async fn handle_refine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResponse>, AppError> {
    run_stage(&state, id, Run::Single(Step::Refine)).await
}

/// POST /api/v1/sessions/:id/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResponse>, AppError> {
    run_stage(&state, id, Run::Single(Step::Keywords)).await
}

/// POST /api/v1/sessions/:id/generate-all
///
/// Draft → refine → keywords in one request.
pub async fn handle_generate_all(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResponse>, AppError> {
    run_stage(&state, id, Run::All).await
}

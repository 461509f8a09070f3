//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::report::{analyze_text, build_report, AnalysisReport, TextReport};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// POST /api/v1/analysis/text
///
/// Stateless length / readability / cliché statistics for any text.
pub async fn handle_analyze_text(Json(request): Json<AnalyzeTextRequest>) -> Json<TextReport> {
    Json(analyze_text(&request.text))
}

/// GET /api/v1/sessions/:id/analysis
pub async fn handle_session_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisReport>, AppError> {
    let project = state.sessions.get(id).await?;
    build_report(&project)
        .map(Json)
        .ok_or_else(|| AppError::Validation("아직 분석할 텍스트가 없습니다.".to_string()))
}

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{render, write_export, ExportFormat};
use crate::models::project::Stage;
use crate::state::AppState;

/// GET /api/v1/sessions/:id/export/:format
///
/// Returns the document as an attachment. `format` is `markdown`, `json` or `text`.
/// With `EXPORT_DIR` configured the file is also saved there.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, ExportFormat)>,
) -> Result<Response, AppError> {
    let project = state.sessions.get(id).await?;
    let doc = match &state.export_dir {
        Some(dir) => {
            let (path, doc) = write_export(dir, &project, format)?;
            info!("Session {id} export saved to {}", path.display());
            doc
        }
        None => render(&project, format, Utc::now())?,
    };

    info!(
        "Session {id} exported as {:?} ({}, stage {:?} → {:?})",
        doc.format,
        doc.file_name,
        project.stage(),
        Stage::Exported
    );

    Ok((
        [
            (header::CONTENT_TYPE, doc.format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.file_name),
            ),
        ],
        doc.body,
    )
        .into_response())
}

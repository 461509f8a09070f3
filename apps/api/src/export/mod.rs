//! Export of a finished session as Markdown, a JSON project file or plain text.
//!
//! Exports are write-only; there is no import path. File names carry the
//! Unix timestamp of the export to avoid collisions.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::project::ProjectState;

pub mod handlers;

/// Literal format tag written into every JSON project file.
pub const PROJECT_FORMAT_VERSION: &str = "2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Json,
    Text,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn file_name(self, unix_ts: i64) -> String {
        match self {
            ExportFormat::Markdown => format!("cover_letter_{unix_ts}.md"),
            ExportFormat::Json => format!("cover_letter_project_{unix_ts}.json"),
            ExportFormat::Text => format!("cover_letter_{unix_ts}.txt"),
        }
    }
}

#[derive(Serialize)]
struct ProjectFile<'a> {
    #[serde(flatten)]
    project: &'a ProjectState,
    version: &'static str,
}

/// A rendered export ready to be sent or written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub file_name: String,
    pub body: String,
}

fn final_text(project: &ProjectState) -> Result<&str, AppError> {
    project
        .final_text()
        .ok_or_else(|| AppError::Validation("내보낼 텍스트가 없습니다.".to_string()))
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn render_markdown(project: &ProjectState) -> Result<String, AppError> {
    let text = final_text(project)?;
    Ok(format!(
        "# 자기소개서\n\n**지원 직무**: {}\n**작성일**: {}\n\n{}\n\n---\n*AI 자기소개서 작성기로 생성됨*\n",
        project.job_title,
        format_timestamp(project.timestamp),
        text
    ))
}

pub fn render_json(project: &ProjectState) -> Result<String, AppError> {
    final_text(project)?;
    let file = ProjectFile {
        project,
        version: PROJECT_FORMAT_VERSION,
    };
    serde_json::to_string_pretty(&file)
        .context("Failed to serialize project")
        .map_err(AppError::Internal)
}

pub fn render_text(project: &ProjectState) -> Result<String, AppError> {
    final_text(project).map(str::to_string)
}

pub fn render(
    project: &ProjectState,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportDocument, AppError> {
    let body = match format {
        ExportFormat::Markdown => render_markdown(project)?,
        ExportFormat::Json => render_json(project)?,
        ExportFormat::Text => render_text(project)?,
    };
    Ok(ExportDocument {
        format,
        file_name: format.file_name(now.timestamp()),
        body,
    })
}

/// Renders an export and writes it into `dir`. Returns the written path along
/// with the document, so the caller can also send it.
pub fn write_export(
    dir: &Path,
    project: &ProjectState,
    format: ExportFormat,
) -> Result<(PathBuf, ExportDocument), AppError> {
    let doc = render(project, format, Utc::now())?;
    let path = dir.join(&doc.file_name);
    std::fs::write(&path, doc.body.as_bytes())
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok((path, doc))
}

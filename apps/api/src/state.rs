use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::AppError;
use crate::llm_client::LlmProvider;
use crate::search::SearchProvider;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; generation is then refused.
    pub llm: Option<Arc<dyn LlmProvider>>,
    pub search: Arc<dyn SearchProvider>,
    pub sessions: SessionStore,
    /// Directory that receives a copy of every export, when configured.
    pub export_dir: Option<PathBuf>,
}

impl AppState {
    /// The LLM provider, or `CredentialMissing` before any call is attempted.
    pub fn require_llm(&self) -> Result<Arc<dyn LlmProvider>, AppError> {
        self.llm.clone().ok_or(AppError::CredentialMissing)
    }
}

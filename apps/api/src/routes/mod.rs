pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(generation::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(generation::handle_get_session).delete(generation::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/inputs",
            put(generation::handle_update_inputs),
        )
        .route(
            "/api/v1/sessions/:id/settings",
            put(generation::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(generation::handle_reset_session),
        )
        // Generation stages
        .route("/api/v1/sessions/:id/draft", post(generation::handle_draft))
        .route("/api/v1/sessions/:id/refine", post(generation::handle_refine))
        .route(
            "/api/v1/sessions/:id/keywords",
            post(generation::handle_keywords),
        )
        .route(
            "/api/v1/sessions/:id/generate-all",
            post(generation::handle_generate_all),
        )
        // Analysis & export
        .route(
            "/api/v1/sessions/:id/analysis",
            get(analysis::handle_session_analysis),
        )
        .route(
            "/api/v1/sessions/:id/export/:format",
            get(export::handle_export),
        )
        .route("/api/v1/analysis/text", post(analysis::handle_analyze_text))
        // Résumé
        .route("/api/v1/resume", post(resume::handle_resume))
        .with_state(state)
}

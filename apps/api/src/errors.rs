use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{LlmError, LlmErrorKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No API key configured. Checked before any network call is attempted.
    #[error("OpenAI API key is not configured")]
    CredentialMissing,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::CredentialMissing => (
                StatusCode::PRECONDITION_FAILED,
                "CREDENTIAL_MISSING",
                "OpenAI API 키가 설정되지 않았습니다. OPENAI_API_KEY 환경변수를 설정해주세요."
                    .to_string(),
            ),
            AppError::Llm(e) => match e.kind {
                LlmErrorKind::RateLimited => {
                    tracing::warn!("LLM rate limited: {}", e.message);
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        "RATE_LIMITED",
                        "API 호출 한도 초과. 잠시 후 다시 시도해주세요.".to_string(),
                    )
                }
                LlmErrorKind::InvalidCredential => {
                    tracing::warn!("LLM rejected credential: {}", e.message);
                    (
                        StatusCode::UNAUTHORIZED,
                        "INVALID_CREDENTIAL",
                        "유효하지 않은 API 키입니다.".to_string(),
                    )
                }
                LlmErrorKind::Failure => {
                    tracing::error!("LLM error: {}", e.message);
                    (
                        StatusCode::BAD_GATEWAY,
                        "LLM_ERROR",
                        format!("API 호출 실패: {}", e.message),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_credential_missing_is_precondition_failed() {
        assert_eq!(status_of(AppError::CredentialMissing), StatusCode::PRECONDITION_FAILED);
    }

    #[test]
    fn test_llm_kinds_map_to_distinct_statuses() {
        let rate = AppError::Llm(LlmError::new(LlmErrorKind::RateLimited, "x"));
        let cred = AppError::Llm(LlmError::new(LlmErrorKind::InvalidCredential, "x"));
        let fail = AppError::Llm(LlmError::new(LlmErrorKind::Failure, "x"));
        assert_eq!(status_of(rate), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_of(cred), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(fail), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_and_not_found() {
        assert_eq!(
            status_of(AppError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
    }
}

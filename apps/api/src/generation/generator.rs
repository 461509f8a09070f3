//! Cover letter generation: builds the draft and refinement prompts from a
//! `ProjectState` and sends them through the injected `LlmProvider`.
//!
//! These functions never touch the project's derived fields; storing the
//! result is the pipeline's job, so a failed call leaves the state as it was.

use tracing::info;

use crate::analysis::text::count_korean_chars;
use crate::generation::prompts::{
    DRAFT_MAX_TOKENS, DRAFT_PROMPT_TEMPLATE, JD_HEADER, JOB_TITLE_HEADER, LENGTH_TOLERANCE,
    QUESTIONS_HEADER, REFINE_MAX_TOKENS, REFINE_PROMPT_TEMPLATE, REFINE_TEMPERATURE,
    RESUME_HEADER,
};
use crate::llm_client::prompts::{COVER_LETTER_CONSULTANT_SYSTEM, EDITOR_SYSTEM};
use crate::llm_client::{CompletionRequest, LlmError, LlmProvider};
use crate::models::project::ProjectState;

/// Joins the non-empty input sections, each under its labelled header.
/// The job title goes on the header line; the others start on the next line.
pub fn build_context(project: &ProjectState) -> String {
    let mut parts = Vec::new();

    if !project.job_title.is_empty() {
        parts.push(format!("{JOB_TITLE_HEADER}: {}", project.job_title));
    }
    for (header, body) in [
        (JD_HEADER, &project.jd_text),
        (RESUME_HEADER, &project.resume_text),
        (QUESTIONS_HEADER, &project.questions),
    ] {
        if !body.is_empty() {
            parts.push(format!("{header}:\n{body}"));
        }
    }

    parts.join("\n\n")
}

pub fn build_draft_prompt(project: &ProjectState) -> String {
    DRAFT_PROMPT_TEMPLATE
        .replace("{tone}", project.settings.tone.label())
        .replace("{context}", &build_context(project))
}

pub fn build_refine_prompt(text: &str, project: &ProjectState) -> String {
    REFINE_PROMPT_TEMPLATE
        .replace("{current_chars}", &count_korean_chars(text).to_string())
        .replace("{target_len}", &project.settings.target_len.to_string())
        .replace("{tolerance}", &LENGTH_TOLERANCE.to_string())
        .replace("{tone}", project.settings.tone.label())
        .replace("{text}", text)
}

/// Generates the first draft with the session's model and temperature.
/// Returns the raw response text, which may contain markdown.
pub async fn generate_draft(
    project: &ProjectState,
    llm: &dyn LlmProvider,
) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        project.settings.model.id(),
        COVER_LETTER_CONSULTANT_SYSTEM,
        build_draft_prompt(project),
        project.settings.temperature,
        DRAFT_MAX_TOKENS,
    );

    let draft = llm
        .complete(request)
        .await
        .map_err(|e| LlmError::new(e.kind, format!("초안 생성 실패: {}", e.message)))?;

    info!(
        "Draft generated: {} Hangul chars (model={})",
        count_korean_chars(&draft),
        project.settings.model
    );
    Ok(draft)
}

/// Rewrites `text` towards the target length with a fixed low temperature.
pub async fn refine_text(
    text: &str,
    project: &ProjectState,
    llm: &dyn LlmProvider,
) -> Result<String, LlmError> {
    let request = CompletionRequest::new(
        project.settings.model.id(),
        EDITOR_SYSTEM,
        build_refine_prompt(text, project),
        REFINE_TEMPERATURE,
        REFINE_MAX_TOKENS,
    );

    let refined = llm
        .complete(request)
        .await
        .map_err(|e| LlmError::new(e.kind, format!("텍스트 정제 실패: {}", e.message)))?;

    info!(
        "Text refined: {} → {} Hangul chars (target {})",
        count_korean_chars(text),
        count_korean_chars(&refined),
        project.settings.target_len
    );
    Ok(refined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::tone::Tone;
    use crate::llm_client::testing::{FailingLlm, RecordingLlm};
    use crate::llm_client::LlmErrorKind;
    use crate::models::project::{GenerationSettings, ModelChoice};

    fn sample_project() -> ProjectState {
        let mut p = ProjectState::new(GenerationSettings {
            model: ModelChoice::Gpt4o,
            temperature: 0.9,
            target_len: 800,
            tone: Tone::LogicalAnalytical,
        });
        p.job_title = "데이터 분석가 - 삼성전자".to_string();
        p.jd_text = "SQL, Python 필수".to_string();
        p.resume_text = "매출 분석 대시보드 구축, 리포팅 시간 30% 단축".to_string();
        p.questions = "지원 동기를 작성해주세요.".to_string();
        p
    }

    #[test]
    fn test_context_sections_in_fixed_order() {
        let ctx = build_context(&sample_project());
        let title = ctx.find("지원 직무/회사: 데이터 분석가").unwrap();
        let jd = ctx.find("채용 공고/직무 기술서:\nSQL").unwrap();
        let resume = ctx.find("지원자 이력/경험:\n매출").unwrap();
        let questions = ctx.find("자기소개서 문항:\n지원 동기").unwrap();
        assert!(title < jd && jd < resume && resume < questions);
        assert_eq!(ctx.matches("\n\n").count(), 3);
    }

    #[test]
    fn test_context_skips_empty_sections() {
        let mut p = sample_project();
        p.jd_text.clear();
        p.resume_text.clear();
        let ctx = build_context(&p);
        assert!(!ctx.contains(JD_HEADER));
        assert!(!ctx.contains(RESUME_HEADER));
        assert_eq!(
            ctx,
            "지원 직무/회사: 데이터 분석가 - 삼성전자\n\n자기소개서 문항:\n지원 동기를 작성해주세요."
        );
    }

    #[test]
    fn test_draft_prompt_carries_tone_and_rules() {
        let prompt = build_draft_prompt(&sample_project());
        assert!(prompt.contains("논리적이고 분석적인 톤 유지"));
        assert!(prompt.contains("STAR 기법"));
        assert!(prompt.contains("**굵게**"));
        assert!(prompt.contains("타인의 성과 도용"));
        assert!(prompt.contains("SQL, Python 필수"));
    }

    #[test]
    fn test_user_braces_are_not_placeholders() {
        let mut p = sample_project();
        p.resume_text = "literal {tone} in resume".to_string();
        let prompt = build_draft_prompt(&p);
        assert!(prompt.contains("literal {tone} in resume"));
    }

    #[test]
    fn test_refine_prompt_lengths() {
        let draft = "가".repeat(1000);
        let prompt = build_refine_prompt(&draft, &sample_project());
        assert!(prompt.contains("현재 길이: 1000자"));
        assert!(prompt.contains("목표 길이: 800자"));
        assert!(prompt.contains("(±50자)"));
        assert!(prompt.ends_with(&draft));
    }

    #[tokio::test]
    async fn test_generate_draft_uses_project_model_and_temperature() {
        let llm = RecordingLlm::new(&["**지원 동기**\n저는..."]);
        let project = sample_project();
        let draft = generate_draft(&project, &llm).await.unwrap();
        assert!(draft.starts_with("**지원 동기**"));

        let req = llm.request(0);
        assert_eq!(req.model, "gpt-4o");
        assert!((req.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(req.max_tokens, DRAFT_MAX_TOKENS);
        assert_eq!(req.messages[0].content, COVER_LETTER_CONSULTANT_SYSTEM);
    }

    #[tokio::test]
    async fn test_refine_uses_fixed_temperature() {
        let llm = RecordingLlm::new(&["다듬어진 글"]);
        let project = sample_project();
        let draft = "가".repeat(1000);
        let refined = refine_text(&draft, &project, &llm).await.unwrap();
        assert_eq!(refined, "다듬어진 글");

        let req = llm.request(0);
        assert_eq!(req.model, "gpt-4o");
        assert!((req.temperature - REFINE_TEMPERATURE).abs() < f32::EPSILON);
        assert_eq!(req.max_tokens, REFINE_MAX_TOKENS);
        let prompt = req.user_prompt().unwrap();
        assert!(prompt.contains("현재 길이: 1000자"));
        assert!(prompt.contains("목표 길이: 800자"));
    }

    #[tokio::test]
    async fn test_generate_draft_failure_keeps_kind() {
        let llm = FailingLlm::new(LlmErrorKind::InvalidCredential);
        let err = generate_draft(&sample_project(), &llm).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::InvalidCredential);
        assert!(err.message.starts_with("초안 생성 실패"));
    }
}

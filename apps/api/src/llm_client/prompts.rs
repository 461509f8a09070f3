// Shared system prompts.
// Each module that calls the LLM keeps its own user-prompt templates in its
// own prompts.rs; the personas below are reused across them.

/// Persona for cover letter drafting.
pub const COVER_LETTER_CONSULTANT_SYSTEM: &str = "당신은 전문 자기소개서 작성 컨설턴트입니다.";

/// Persona for length/tone refinement.
pub const EDITOR_SYSTEM: &str =
    "당신은 전문 에디터입니다. 정확한 길이 조정과 품질 향상을 동시에 수행합니다.";

/// Persona for job description keyword extraction.
pub const RECRUITER_SYSTEM: &str =
    "당신은 채용 전문가입니다. 정확하고 구체적인 키워드만 추출하세요.";

/// Persona for the résumé-based cover letter.
pub const RESUME_ASSISTANT_SYSTEM: &str = "친절하고 전문적인 이력서 및 자기소개서 작성 도우미입니다. \
    사용자에게 최적화된 문서를 생성합니다.";

// LLM prompt constants for the résumé-based cover letter.

pub const RESUME_COVER_LETTER_MODEL: &str = "gpt-4o-mini";
pub const RESUME_COVER_LETTER_TEMPERATURE: f32 = 0.7;
pub const RESUME_COVER_LETTER_MAX_TOKENS: u32 = 1200;

/// Replace: {name}, then {resume}.
pub const RESUME_COVER_LETTER_TEMPLATE: &str = "다음 이력서 정보를 바탕으로 한국어로 자기소개서를 작성해줘. \
자기소개서는 3~4문단으로 구성하고, 지원 동기와 강점(특히 경력과 기술/역량에 기반한)을 부각시켜 작성해줘. \
또한, {name}님의 개인적인 성장 경험과 지원하는 회사(가상의 회사라고 가정해도 됨)에 기여할 수 있는 역량을 연결하여 작성해줘.

--- 이력서 정보 ---
{resume}
-------------------
자기소개서 시작:";

// All LLM prompt constants for the Generation module.
// Placeholders are filled with `str::replace`; user-supplied text is always
// substituted last so braces inside it are never treated as placeholders.

pub const DRAFT_MAX_TOKENS: u32 = 1500;
pub const REFINE_TEMPERATURE: f32 = 0.4;
pub const REFINE_MAX_TOKENS: u32 = 1200;
/// Allowed deviation from the target length, in Hangul syllables.
pub const LENGTH_TOLERANCE: u32 = 50;

/// Context section headers, in the order they appear in the draft prompt.
pub const JOB_TITLE_HEADER: &str = "지원 직무/회사";
pub const JD_HEADER: &str = "채용 공고/직무 기술서";
pub const RESUME_HEADER: &str = "지원자 이력/경험";
pub const QUESTIONS_HEADER: &str = "자기소개서 문항";

/// Draft generation prompt. Replace: {tone}, then {context}.
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"다음 정보를 바탕으로 한국어 자기소개서를 작성해주세요.

{context}

작성 가이드라인:
1. 각 문항별로 구체적이고 차별화된 답변 작성
2. STAR 기법 활용 (Situation, Task, Action, Result)
3. 정량적 성과와 구체적 사례 포함
4. {tone} 톤 유지
5. 문항 제목을 **굵게** 표시
6. 채용공고의 핵심 키워드 자연스럽게 포함

금지사항:
- 일반적이고 추상적인 표현 남발
- 근거 없는 과장
- 타인의 성과 도용"#;

/// Refinement prompt. Replace: {current_chars}, {target_len}, {tolerance}, {tone}, then {text}.
pub const REFINE_PROMPT_TEMPLATE: &str = r#"다음 자기소개서를 개선해주세요.

현재 길이: {current_chars}자
목표 길이: {target_len}자 (±{tolerance}자)
톤: {tone}

개선 사항:
1. 목표 길이에 맞게 조정
2. 문장 구조 개선 및 가독성 향상
3. 불필요한 수식어 제거
4. 구체적 수치와 성과는 보존
5. 논리적 흐름 강화

원문:
{text}"#;

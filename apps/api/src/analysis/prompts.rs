// LLM prompt constants for keyword extraction.

/// Model used for keyword extraction regardless of the session's model choice.
pub const KEYWORD_MODEL: &str = "gpt-4o-mini";
pub const KEYWORD_TEMPERATURE: f32 = 0.1;
pub const KEYWORD_MAX_TOKENS: u32 = 400;
pub const DEFAULT_TOP_K: usize = 20;

/// Keyword extraction prompt. Replace `{top_k}` and `{text}` before sending.
pub const KEYWORD_PROMPT_TEMPLATE: &str = r#"아래 채용 공고/직무 설명서를 분석하여 중요한 키워드를 추출해주세요.

추출 기준:
1. 직무 관련 전문 용어 및 기술
2. 필수 역량 및 자격요건
3. 우대사항
4. 회사/조직 문화 관련 키워드

형식: 쉼표로 구분하여 중요도 순으로 최대 {top_k}개

텍스트:
{text}"#;

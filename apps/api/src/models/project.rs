use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::keywords::CoverageResult;
use crate::errors::AppError;
use crate::generation::tone::Tone;

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.2);
pub const TARGET_LEN_RANGE: (u32, u32) = (200, 3000);

pub const DEFAULT_QUESTIONS: &str = "지원 동기와 입사 후 포부를 작성해주세요.\n\
    본인의 강점과 이를 증명하는 사례를 작성해주세요.\n\
    협업 경험과 갈등 해결 사례를 작성해주세요.";

/// Chat models a session may pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-2024-08-06")]
    Gpt4o20240806,
}

impl ModelChoice {
    pub fn id(self) -> &'static str {
        match self {
            ModelChoice::Gpt4oMini => "gpt-4o-mini",
            ModelChoice::Gpt4o => "gpt-4o",
            ModelChoice::Gpt4o20240806 => "gpt-4o-2024-08-06",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// User-editable generation parameters, one set per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: ModelChoice,
    pub temperature: f32,
    /// Target length in Hangul syllables.
    pub target_len: u32,
    pub tone: Tone,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ModelChoice::default(),
            temperature: 0.7,
            target_len: 800,
            tone: Tone::default(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        let (t_min, t_max) = TEMPERATURE_RANGE;
        if !(t_min..=t_max).contains(&self.temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be between {t_min} and {t_max}, got {}",
                self.temperature
            )));
        }
        let (l_min, l_max) = TARGET_LEN_RANGE;
        if !(l_min..=l_max).contains(&self.target_len) {
            return Err(AppError::Validation(format!(
                "target_len must be between {l_min} and {l_max}, got {}",
                self.target_len
            )));
        }
        Ok(())
    }
}

/// Where a session currently is in the wizard. Derived from which fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Empty,
    DraftGenerated,
    Refined,
    KeywordsExtracted,
    CoverageComputed,
    Exported,
}

/// The whole state of one cover letter session.
///
/// Derived fields stay `None` until their stage has produced them. A failed
/// stage never clears a previously produced value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    pub job_title: String,
    pub jd_text: String,
    pub resume_text: String,
    /// One question per line.
    pub questions: String,
    pub draft: Option<String>,
    pub refined: Option<String>,
    /// Ordered by importance as reported by the model.
    pub keywords: Option<Vec<String>>,
    pub coverage: Option<CoverageResult>,
    #[serde(flatten)]
    pub settings: GenerationSettings,
    /// Set when a draft is generated. Serialized as Unix seconds (float).
    #[serde(default, with = "epoch_seconds")]
    pub timestamp: Option<DateTime<Utc>>,
}

mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(t) => s.serialize_some(&(t.timestamp_micros() as f64 / 1e6)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let secs = Option::<f64>::deserialize(d)?;
        Ok(secs.and_then(|s| DateTime::from_timestamp_micros((s * 1e6).round() as i64)))
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(GenerationSettings::default())
    }
}

/// Partial update of the user-entered fields. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputPatch {
    pub job_title: Option<String>,
    pub jd_text: Option<String>,
    pub resume_text: Option<String>,
    pub questions: Option<String>,
}

impl ProjectState {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            job_title: String::new(),
            jd_text: String::new(),
            resume_text: String::new(),
            questions: DEFAULT_QUESTIONS.to_string(),
            draft: None,
            refined: None,
            keywords: None,
            coverage: None,
            settings,
            timestamp: None,
        }
    }

    pub fn apply_inputs(&mut self, patch: InputPatch) {
        if let Some(v) = patch.job_title {
            self.job_title = v;
        }
        if let Some(v) = patch.jd_text {
            self.jd_text = v;
        }
        if let Some(v) = patch.resume_text {
            self.resume_text = v;
        }
        if let Some(v) = patch.questions {
            self.questions = v;
        }
    }

    /// Job title and questions are required before any generation stage runs.
    pub fn validate_inputs(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();
        if self.job_title.trim().is_empty() {
            missing.push("지원 직무/회사");
        }
        if self.questions.trim().is_empty() {
            missing.push("자기소개서 문항");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "필수 입력 사항: {}",
                missing.join(", ")
            )))
        }
    }

    /// Refined text if present, otherwise the draft.
    pub fn final_text(&self) -> Option<&str> {
        self.refined.as_deref().or(self.draft.as_deref())
    }

    /// Full restart: drop every derived field, keep settings.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    pub fn stage(&self) -> Stage {
        if self.draft.is_none() {
            Stage::Empty
        } else if self.coverage.is_some() {
            Stage::CoverageComputed
        } else if self.keywords.is_some() {
            Stage::KeywordsExtracted
        } else if self.refined.is_some() {
            Stage::Refined
        } else {
            Stage::DraftGenerated
        }
    }
}

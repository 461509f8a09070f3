//! Tone labels offered for cover letter writing.
//!
//! The label text itself is what gets embedded in the prompts, so the serde
//! representation is the Korean label, not the variant name.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "정중하고 간결한")]
    PoliteConcise,
    #[serde(rename = "열정적이고 직설적인")]
    PassionateDirect,
    #[serde(rename = "논리적이고 분석적인")]
    LogicalAnalytical,
    #[serde(rename = "따뜻하고 스토리텔링 위주")]
    WarmStorytelling,
    #[serde(rename = "창의적이고 도전적인")]
    CreativeChallenging,
}

impl Tone {
    #[cfg(test)]
    pub const ALL: [Tone; 5] = [
        Tone::PoliteConcise,
        Tone::PassionateDirect,
        Tone::LogicalAnalytical,
        Tone::WarmStorytelling,
        Tone::CreativeChallenging,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::PoliteConcise => "정중하고 간결한",
            Tone::PassionateDirect => "열정적이고 직설적인",
            Tone::LogicalAnalytical => "논리적이고 분석적인",
            Tone::WarmStorytelling => "따뜻하고 스토리텔링 위주",
            Tone::CreativeChallenging => "창의적이고 도전적인",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

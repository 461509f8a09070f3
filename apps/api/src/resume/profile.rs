//! Résumé profile and its Markdown rendering. No LLM involved.

use serde::{Deserialize, Serialize};

use crate::resume::prompts::RESUME_COVER_LETTER_TEMPLATE;

/// Everything the applicant enters on the résumé form. Free-text sections are
/// rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub name: String,
    pub cellphone: String,
    pub email: String,
    pub address: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub certification: String,
    pub language: String,
    pub awards: String,
    pub activities: String,
    pub portfolio_link: String,
}

impl ResumeProfile {
    /// Optional free-text sections with their headings, in display order.
    fn sections(&self) -> [(&'static str, &str); 7] {
        [
            ("🎓 학력", self.education.as_str()),
            ("🏢 경력", self.experience.as_str()),
            ("💡 기술 및 역량", self.skills.as_str()),
            ("📜 자격증", self.certification.as_str()),
            ("🗣️ 어학 능력", self.language.as_str()),
            ("🏆 수상 경력", self.awards.as_str()),
            ("🌍 대외 활동", self.activities.as_str()),
        ]
    }
}

pub fn render_resume_markdown(profile: &ResumeProfile) -> String {
    let mut parts: Vec<String> = vec![
        "## 📄 이 력 서\n".to_string(),
        "### 👤 개인 정보\n".to_string(),
        format!("- **이름**: {}", profile.name),
        format!("- **전화번호**: {}", profile.cellphone),
        format!("- **이메일**: {}", profile.email),
    ];
    if !profile.address.is_empty() {
        parts.push(format!("- **주소**: {}", profile.address));
    }
    parts.push("\n".to_string());

    for (heading, body) in profile.sections() {
        if body.is_empty() {
            continue;
        }
        parts.push(format!("### {heading}\n"));
        parts.push(format!("{body}\n"));
        parts.push("\n".to_string());
    }

    if !profile.portfolio_link.is_empty() {
        parts.push("### 🔗 포트폴리오\n".to_string());
        parts.push(format!("- [포트폴리오 링크]({})\n", profile.portfolio_link));
        parts.push("\n".to_string());
    }

    parts.join("\n")
}

pub fn build_resume_cover_letter_prompt(profile: &ResumeProfile, resume_md: &str) -> String {
    RESUME_COVER_LETTER_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{resume}", resume_md)
}

//! Text statistics over a finished cover letter: Hangul length, a
//! sentence-length readability heuristic and a cliché dictionary scan.
//!
//! Everything here is pure and infallible.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::round_to;

/// Sentences longer than this (in characters) count as "long".
const LONG_SENTENCE_CHARS: usize = 100;

static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s*").expect("sentence split pattern is valid"));

/// Cliché dictionary, scanned in this order.
const CLICHE_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "과도한 형용사",
        &["매우", "정말", "너무", "굉장히", "엄청", "최고의", "완벽한"],
    ),
    (
        "뻔한 표현",
        &[
            "열정적으로",
            "끊임없이 노력",
            "항상 최선",
            "도전정신",
            "책임감",
            "소통능력",
        ],
    ),
    (
        "추상적 표현",
        &["시너지", "윈윈", "파라다임", "벤치마킹", "글로벌 마인드"],
    ),
    (
        "과장 표현",
        &["혁신적인", "차별화된", "독창적인", "탁월한", "뛰어난"],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    /// Mean sentence length in characters, one decimal.
    pub avg_sentence_length: f64,
    pub long_sentences: usize,
    /// 0 – 100, one decimal.
    pub readability_score: f64,
    pub total_sentences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClicheCategory {
    pub category: String,
    /// `"word(count)"` for every dictionary word that occurs.
    pub found: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClicheResult {
    pub categories: Vec<ClicheCategory>,
    pub total_cliche_count: usize,
    /// Occurrences per 1000 characters, two decimals.
    pub cliche_density: f64,
}

impl ClicheResult {
    #[cfg(test)]
    pub fn category(&self, name: &str) -> Option<&ClicheCategory> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// Counts Hangul syllables (U+AC00–U+D7A3). Jamo, Latin, digits and
/// punctuation are not counted.
pub fn count_korean_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| ('\u{AC00}'..='\u{D7A3}').contains(c))
        .count()
}

/// Sentence-length readability heuristic.
///
/// score = clamp(0, 100, 100 - (avg_len - 50) * 2 - long_count * 10)
pub fn analyze_readability(text: &str) -> ReadabilityResult {
    let lengths: Vec<usize> = SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().count())
        .collect();

    if lengths.is_empty() {
        return ReadabilityResult::default();
    }

    let avg = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    let long_sentences = lengths.iter().filter(|&&l| l > LONG_SENTENCE_CHARS).count();
    let score = (100.0 - (avg - 50.0) * 2.0 - long_sentences as f64 * 10.0).clamp(0.0, 100.0);

    ReadabilityResult {
        avg_sentence_length: round_to(avg, 1),
        long_sentences,
        readability_score: round_to(score, 1),
        total_sentences: lengths.len(),
    }
}

/// Scans the cliché dictionary with plain substring counting, so a short
/// entry also matches inside a longer word.
pub fn detect_cliche_advanced(text: &str) -> ClicheResult {
    let mut total = 0;
    let categories = CLICHE_CATEGORIES
        .iter()
        .map(|(category, words)| {
            let found = words
                .iter()
                .filter_map(|word| {
                    let count = text.matches(word).count();
                    (count > 0).then(|| {
                        total += count;
                        format!("{word}({count})")
                    })
                })
                .collect();
            ClicheCategory {
                category: category.to_string(),
                found,
            }
        })
        .collect();

    let len = text.chars().count().max(1);
    ClicheResult {
        categories,
        total_cliche_count: total,
        cliche_density: round_to(total as f64 / len as f64 * 1000.0, 2),
    }
}

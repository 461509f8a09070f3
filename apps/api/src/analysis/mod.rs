// Analysis of generated text: pure statistics (text), JD keyword extraction
// and coverage scoring (keywords), and the combined per-session report.

pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod report;
pub mod text;

/// Rounds to `decimals` places, exact ties to even (6.25 → 6.2).
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

//! Formatting utilities for terminal output

use crate::core::PositionalConstraint;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format an n-gram frequency; they are tiny, so always scientific
#[must_use]
pub fn format_frequency(value: f64) -> String {
    format!("{value:.2e}")
}

/// Render a positional constraint as uppercase letters and dots
#[must_use]
pub fn format_pattern(pattern: &PositionalConstraint) -> String {
    pattern
        .slots()
        .iter()
        .map(|slot| slot.map_or('·', |letter| letter.as_char().to_ascii_uppercase()))
        .collect()
}

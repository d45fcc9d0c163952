//! Trend lookup for the filter command
//!
//! Fetches the yearly usage of the top matches, with a spinner while the
//! proxy answers.

use crate::trends::{TrendError, TrendPoint, TrendSource, WordKey, YearRange, fetch_trend_points};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Year-by-word usage table
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTable {
    /// Column order
    pub words: Vec<String>,
    pub points: Vec<TrendPoint>,
}

impl TrendTable {
    /// Largest value in the table, zero when empty
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .flat_map(|p| p.values.values().copied())
            .fold(0.0, f64::max)
    }
}

/// Fetch trends for `words`
///
/// # Errors
///
/// Returns the source's `TrendError`; nothing is retried.
pub async fn fetch_trend_table(
    source: &dyn TrendSource,
    words: &[String],
    range: YearRange,
) -> Result<TrendTable, TrendError> {
    let key = WordKey::new(words);
    if key.is_empty() {
        return Ok(TrendTable {
            words: Vec::new(),
            points: Vec::new(),
        });
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching usage trends for {key}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fetch_trend_points(source, &key, range).await;
    spinner.finish_and_clear();

    Ok(TrendTable {
        words: key.words().to_vec(),
        points: result?,
    })
}

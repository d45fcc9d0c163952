//! Year-indexed trend tables
//!
//! The provider answers with one timeseries per ngram. The UI wants the
//! transpose: one row per year, with a value for every requested word.

use super::key::WordKey;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Suffix the provider appends to case-insensitive aggregates, e.g. `crane (All)`
const AGGREGATE_SUFFIX: &str = "(All)";

/// Inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

impl YearRange {
    pub const DEFAULT_START: u16 = 2019;
    pub const DEFAULT_END: u16 = 2025;

    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Years in ascending order, empty when `end < start`
    pub fn years(self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.years().count()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end < self.start
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START, Self::DEFAULT_END)
    }
}

/// One entry of the provider's response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramSeries {
    pub ngram: String,
    #[serde(default)]
    pub timeseries: Vec<f64>,
}

/// Usage values of every requested word for one year
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: u16,
    pub values: FxHashMap<String, f64>,
}

impl TrendPoint {
    /// Value for a word, zero when the word has no data
    #[must_use]
    pub fn value(&self, word: &str) -> f64 {
        self.values.get(word).copied().unwrap_or(0.0)
    }
}

/// Transpose provider series into one `TrendPoint` per year
///
/// Every word of `key` gets a value in every point; gaps are zero. Ngram
/// labels are matched case-insensitively, and an `(All)` aggregate wins over
/// individual case variants of the same word. Series for words outside the
/// key are ignored.
///
/// # Examples
/// ```
/// use wordle_butler::trends::{NgramSeries, WordKey, YearRange, reshape};
///
/// let key = WordKey::new(&["crane"]);
/// let payload = vec![NgramSeries { ngram: "crane".into(), timeseries: vec![1.0, 2.0] }];
/// let points = reshape(&key, &payload, YearRange::new(2024, 2026));
///
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[1].value("crane"), 2.0);
/// assert_eq!(points[2].value("crane"), 0.0);
/// ```
#[must_use]
pub fn reshape(key: &WordKey, payload: &[NgramSeries], range: YearRange) -> Vec<TrendPoint> {
    let mut chosen: FxHashMap<&str, (&[f64], bool)> = FxHashMap::default();

    for series in payload {
        let (label, is_aggregate) = normalize_label(&series.ngram);
        let Some(word) = key.words().iter().find(|w| w.eq_ignore_ascii_case(&label)) else {
            continue;
        };

        let replace = match chosen.get(word.as_str()) {
            None => true,
            Some(&(_, existing_is_aggregate)) => is_aggregate && !existing_is_aggregate,
        };
        if replace {
            chosen.insert(word.as_str(), (series.timeseries.as_slice(), is_aggregate));
        }
    }

    range
        .years()
        .enumerate()
        .map(|(idx, year)| {
            let values = key
                .words()
                .iter()
                .map(|word| {
                    let value = chosen
                        .get(word.as_str())
                        .and_then(|(series, _)| series.get(idx))
                        .copied()
                        .unwrap_or(0.0);
                    (word.clone(), value)
                })
                .collect();
            TrendPoint { year, values }
        })
        .collect()
}

/// Strip the aggregate suffix from a provider label
fn normalize_label(ngram: &str) -> (String, bool) {
    let trimmed = ngram.trim();
    match trimmed.strip_suffix(AGGREGATE_SUFFIX) {
        Some(base) => (base.trim().to_lowercase(), true),
        None => (trimmed.to_lowercase(), false),
    }
}

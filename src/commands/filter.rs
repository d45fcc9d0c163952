//! One-shot filter command
//!
//! Applies constraints given on the command line to a loaded word list.

use crate::core::{ConstraintError, Constraints, ExclusionSet, PositionalConstraint, filter_words};

/// Matches for one set of constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub constraints: Constraints,
    pub total_words: usize,
    /// Total number of matches, before `limit` is applied
    pub match_count: usize,
    pub matches: Vec<String>,
}

/// What the filter command has to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Nothing was entered, so nothing was filtered
    NoConstraints,
    Matches(FilterResult),
}

/// Build constraints from the CLI arguments
///
/// Missing patterns mean "no constraint of that kind".
///
/// # Errors
///
/// Returns `ConstraintError` if a positional pattern is not exactly 5
/// characters or holds something other than letters and blanks.
pub fn parse_constraints(
    correct: Option<&str>,
    wrong: Option<&str>,
    excluded: Option<&str>,
) -> Result<Constraints, ConstraintError> {
    let correct = correct
        .map(PositionalConstraint::parse)
        .transpose()?
        .unwrap_or_default();
    let wrong_spots = wrong
        .map(PositionalConstraint::parse)
        .transpose()?
        .unwrap_or_default();
    let excluded = excluded.map(ExclusionSet::from_letters).unwrap_or_default();
    Ok(Constraints::new(correct, wrong_spots, excluded))
}

/// Filter `words`, keeping at most `limit` matches in the result
#[must_use]
pub fn run_filter(words: &[String], constraints: Constraints, limit: Option<usize>) -> FilterOutcome {
    if constraints.is_empty() {
        return FilterOutcome::NoConstraints;
    }

    let found = filter_words(words, &constraints);
    let match_count = found.len();
    let matches = found
        .into_iter()
        .take(limit.unwrap_or(match_count))
        .map(str::to_owned)
        .collect();

    FilterOutcome::Matches(FilterResult {
        constraints,
        total_words: words.len(),
        match_count,
        matches,
    })
}

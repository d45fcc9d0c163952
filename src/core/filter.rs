//! Constraint filtering
//!
//! Decides whether a candidate word is consistent with the green, yellow and
//! gray constraints entered so far.
//!
//! # Algorithm
//! For each word (lowercased):
//! 1. Reject if its length is not 5
//! 2. Reject if it contains any excluded letter, at any position
//! 3. Reject if a green slot disagrees with the letter at that index
//! 4. Reject if a yellow letter sits at its marked index, or is absent from the word
//!
//! Step 4 covers every yellow letter wherever it was marked, so a separate
//! "all yellow letters present" pass would add nothing.

use super::constraints::{Constraints, WORD_LENGTH};

/// Check a single word against the constraints
///
/// # Examples
/// ```
/// use wordle_butler::core::{Constraints, ExclusionSet, matches};
///
/// let constraints = Constraints {
///     wrong_spots: "r....".parse().unwrap(),
///     excluded: ExclusionSet::from_letters("s"),
///     ..Constraints::default()
/// };
///
/// assert!(matches("crane", &constraints));
/// assert!(!matches("react", &constraints)); // R at its marked index
/// assert!(!matches("slate", &constraints)); // S excluded, no R
/// ```
#[must_use]
pub fn matches(word: &str, constraints: &Constraints) -> bool {
    let lowered: Vec<char> = word.to_lowercase().chars().collect();
    let Ok(chars) = <[char; WORD_LENGTH]>::try_from(lowered) else {
        return false;
    };

    if chars.iter().any(|&c| constraints.excluded.contains_char(c)) {
        return false;
    }

    if constraints
        .correct
        .filled()
        .any(|(i, letter)| chars[i] != letter.as_char())
    {
        return false;
    }

    constraints.wrong_spots.filled().all(|(i, letter)| {
        let c = letter.as_char();
        chars[i] != c && chars.contains(&c)
    })
}

/// Filter a word list, keeping input order
///
/// Returns borrowed slices of the original entries; the input is not modified.
///
/// # Examples
/// ```
/// use wordle_butler::core::{Constraints, ExclusionSet, filter_words};
///
/// let words = ["crane", "slate"];
/// let constraints = Constraints {
///     excluded: ExclusionSet::from_letters("st"),
///     ..Constraints::default()
/// };
///
/// assert_eq!(filter_words(&words, &constraints), vec!["crane"]);
/// ```
pub fn filter_words<'a, S: AsRef<str>>(words: &'a [S], constraints: &Constraints) -> Vec<&'a str> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| matches(word, constraints))
        .collect()
}

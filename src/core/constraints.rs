//! Constraint structures for word filtering
//!
//! - `PositionalConstraint`: 5 slots, each empty or holding a letter (green / yellow rows)
//! - `ExclusionSet`: letters forbidden anywhere in the word (gray)
//! - `Constraints`: all three bundled together
//!
//! Every update returns a new value; nothing here is mutated in place.

use super::letter::{Letter, LetterError};
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of every puzzle word
pub const WORD_LENGTH: usize = 5;

/// Characters accepted as "empty slot" in a pattern string
const EMPTY_SLOT_CHARS: &[char] = &['.', '_', '-', '?', ' '];

/// Error type for constraint parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("pattern must be exactly 5 characters, got {0}")]
    InvalidLength(usize),
    #[error("invalid slot in pattern: {0}")]
    InvalidLetter(#[from] LetterError),
}

/// Five ordered slots, each either empty or a single letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionalConstraint([Option<Letter>; WORD_LENGTH]);

impl PositionalConstraint {
    /// A constraint with every slot empty
    #[must_use]
    pub const fn empty() -> Self {
        Self([None; WORD_LENGTH])
    }

    #[must_use]
    pub const fn from_slots(slots: [Option<Letter>; WORD_LENGTH]) -> Self {
        Self(slots)
    }

    /// Parse a pattern such as `"c..n."`
    ///
    /// Letters fill slots, any of `. _ - ?` or a space leaves the slot empty.
    ///
    /// # Errors
    /// Returns `ConstraintError` if the pattern is not 5 characters long or
    /// contains something that is neither a letter nor an empty marker.
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::core::PositionalConstraint;
    ///
    /// let green: PositionalConstraint = "C..n_".parse().unwrap();
    /// assert_eq!(green.get(0).map(|l| l.as_char()), Some('c'));
    /// assert_eq!(green.get(1), None);
    /// assert_eq!(green.to_string(), "c..n.");
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, ConstraintError> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(ConstraintError::InvalidLength(chars.len()));
        }

        let mut slots = [None; WORD_LENGTH];
        for (slot, &c) in slots.iter_mut().zip(&chars) {
            if !EMPTY_SLOT_CHARS.contains(&c) {
                *slot = Some(Letter::new(c)?);
            }
        }
        Ok(Self(slots))
    }

    /// Letter at a slot, `None` when empty or out of range
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Letter> {
        self.0.get(index).copied().flatten()
    }

    /// Return a copy with one slot replaced
    ///
    /// Out-of-range indices leave the constraint unchanged.
    #[must_use]
    pub fn with(&self, index: usize, letter: Option<Letter>) -> Self {
        let mut slots = self.0;
        if let Some(slot) = slots.get_mut(index) {
            *slot = letter;
        }
        Self(slots)
    }

    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &[Option<Letter>; WORD_LENGTH] {
        &self.0
    }

    /// Iterate `(index, letter)` over the filled slots
    pub fn filled(&self) -> impl Iterator<Item = (usize, Letter)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|letter| (i, letter)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

impl FromStr for PositionalConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PositionalConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            match slot {
                Some(letter) => write!(f, "{letter}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

/// Letters that may not appear anywhere in a candidate word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(FxHashSet<Letter>);

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an exclusion set from free text, ignoring non-letters
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::core::ExclusionSet;
    ///
    /// let gray = ExclusionSet::from_letters("S, t!");
    /// assert_eq!(gray.len(), 2);
    /// assert!(gray.contains_char('s'));
    /// ```
    #[must_use]
    pub fn from_letters(text: &str) -> Self {
        text.chars().filter_map(|c| Letter::new(c).ok()).collect()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(&letter)
    }

    /// Check a raw word character against the set
    #[inline]
    #[must_use]
    pub fn contains_char(&self, c: char) -> bool {
        Letter::new(c).is_ok_and(|letter| self.contains(letter))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Letters in alphabetical order
    #[must_use]
    pub fn sorted(&self) -> Vec<Letter> {
        let mut letters: Vec<Letter> = self.0.iter().copied().collect();
        letters.sort_unstable();
        letters
    }
}

impl FromIterator<Letter> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.sorted() {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Green, yellow and gray constraints together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub correct: PositionalConstraint,
    pub wrong_spots: PositionalConstraint,
    pub excluded: ExclusionSet,
}

impl Constraints {
    #[must_use]
    pub const fn new(
        correct: PositionalConstraint,
        wrong_spots: PositionalConstraint,
        excluded: ExclusionSet,
    ) -> Self {
        Self {
            correct,
            wrong_spots,
            excluded,
        }
    }

    /// True when no constraint of any kind has been entered
    ///
    /// Callers use this to skip filtering altogether.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.wrong_spots.is_empty() && self.excluded.is_empty()
    }
}

//! Single-letter constraint values
//!
//! A `Letter` is one lowercase ASCII letter, the unit every constraint slot holds.

use std::fmt;
use thiserror::Error;

/// A lowercase ASCII letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

/// Error type for invalid letters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterError {
    #[error("'{0}' is not an ASCII letter")]
    NonAlphabetic(char),
}

impl Letter {
    /// Create a letter from a character, lowercasing it
    ///
    /// # Errors
    /// Returns `LetterError::NonAlphabetic` for anything outside `a-z`/`A-Z`.
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::core::Letter;
    ///
    /// assert_eq!(Letter::new('Q').unwrap().as_char(), 'q');
    /// assert!(Letter::new('3').is_err());
    /// ```
    pub fn new(c: char) -> Result<Self, LetterError> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_lowercase() as u8))
        } else {
            Err(LetterError::NonAlphabetic(c))
        }
    }

    /// Sanitize raw cell input into at most one letter
    ///
    /// Strips every non-alphabetic character, keeps the first remaining one
    /// and lowercases it. Returns `None` when nothing alphabetic is left.
    ///
    /// # Examples
    /// ```
    /// use wordle_butler::core::Letter;
    ///
    /// assert_eq!(Letter::from_input("9Xy").map(|l| l.as_char()), Some('x'));
    /// assert_eq!(Letter::from_input(" 1!"), None);
    /// ```
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        input.chars().find_map(|c| Self::new(c).ok())
    }

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

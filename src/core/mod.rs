//! Core domain types for constraint filtering
//!
//! This module contains the letter and constraint types plus the filter
//! predicate. Everything here is pure and synchronous.

mod constraints;
mod filter;
mod letter;

pub use constraints::{
    ConstraintError, Constraints, ExclusionSet, PositionalConstraint, WORD_LENGTH,
};
pub use filter::{filter_words, matches};
pub use letter::{Letter, LetterError};

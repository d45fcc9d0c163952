//! Wordle Butler
//!
//! Filters a 5-letter word list by green, yellow and gray letters and charts
//! how often the best matches were used over recent years.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_butler::core::{Constraints, ExclusionSet, PositionalConstraint, filter_words};
//!
//! let words = ["crane", "slate", "react"];
//! let constraints = Constraints::new(
//!     PositionalConstraint::empty(),
//!     PositionalConstraint::empty(),
//!     ExclusionSet::from_letters("st"),
//! );
//!
//! assert_eq!(filter_words(&words, &constraints), vec!["crane"]);
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod wordlists;

// Usage trends
pub mod trends;

// N-gram proxy service
pub mod proxy;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Tracing subscriber setup
pub mod logging;

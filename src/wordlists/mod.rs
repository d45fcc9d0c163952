//! Word lists for constraint filtering
//!
//! The list is fetched once at startup from a remote JSON resource or read from
//! a local file.

pub mod loader;

pub use loader::{DEFAULT_WORD_LIST_URL, WordListError, WordSource};

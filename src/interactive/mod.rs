//! Interactive TUI interface
//!
//! Three rows of letter cells drive the filter; the top matches are charted
//! by yearly usage.

pub mod app;
pub mod rendering;
pub mod state;

pub use app::{App, TOP_TRENDS, WordListState, run_tui};
pub use state::{ConstraintForm, EXCLUDED_MAX, Focus, Region};

//! Command implementations

pub mod filter;
pub mod trends;

pub use filter::{FilterOutcome, FilterResult, parse_constraints, run_filter};
pub use trends::{TrendTable, fetch_trend_table};

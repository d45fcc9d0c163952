//! Word usage trends
//!
//! Retrieves yearly n-gram frequencies for the top matches and reshapes them
//! into a year-indexed table for charting.

mod fetcher;
mod key;
mod series;
mod source;

pub use fetcher::{TrendFetcher, TrendState, TrendUpdate};
pub use key::WordKey;
pub use series::{NgramSeries, TrendPoint, YearRange, reshape};
pub use source::{
    DEFAULT_PROXY_URL, ProxyTrendSource, TrendError, TrendSource, fetch_trend_points,
};

#[cfg(test)]
pub(crate) use fetcher::tests::GatedSource;

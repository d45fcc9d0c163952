//! Trend fetcher with request de-duplication and cancellation
//!
//! # Invariants
//! - A request is only issued when the word-key differs from the last issued key.
//! - Issuing a new request cancels the previous one; a cancelled request never
//!   reaches `apply`.
//! - `apply` only accepts the update of the most recent request (generation check).
//! - A failed request leaves no trend data behind.

use super::key::WordKey;
use super::series::{TrendPoint, YearRange};
use super::source::{TrendError, TrendSource, fetch_trend_points};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// What the trend panel should show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrendState {
    /// Nothing requested
    #[default]
    Idle,
    Loading,
    Ready(Vec<TrendPoint>),
    Failed(String),
}

/// Result of one finished request, delivered back to the fetcher
#[derive(Debug)]
pub struct TrendUpdate {
    generation: u64,
    key: WordKey,
    result: Result<Vec<TrendPoint>, TrendError>,
}

impl TrendUpdate {
    #[must_use]
    pub const fn key(&self) -> &WordKey {
        &self.key
    }
}

/// Owns the trend state of the UI and the at-most-one in-flight request
pub struct TrendFetcher {
    source: Arc<dyn TrendSource>,
    range: YearRange,
    last_key: Option<WordKey>,
    generation: u64,
    in_flight: Option<CancellationToken>,
    state: TrendState,
    updates_tx: mpsc::UnboundedSender<TrendUpdate>,
    updates_rx: mpsc::UnboundedReceiver<TrendUpdate>,
}

impl TrendFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn TrendSource>, range: YearRange) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            source,
            range,
            last_key: None,
            generation: 0,
            in_flight: None,
            state: TrendState::Idle,
            updates_tx,
            updates_rx,
        }
    }

    /// Request trends for `words`
    ///
    /// Returns `true` if a new request was spawned. An unchanged key is a
    /// no-op, even after a failure; an empty key clears everything.
    /// Must be called inside a tokio runtime.
    pub fn request<S: AsRef<str>>(&mut self, words: &[S]) -> bool {
        let key = WordKey::new(words);
        if key.is_empty() {
            self.clear();
            return false;
        }
        if self.last_key.as_ref() == Some(&key) {
            trace!(%key, "trend key unchanged, skipping request");
            return false;
        }

        self.cancel_in_flight();
        self.generation += 1;
        self.last_key = Some(key.clone());
        self.state = TrendState::Loading;

        let generation = self.generation;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        let source = Arc::clone(&self.source);
        let updates = self.updates_tx.clone();
        let range = self.range;
        debug!(%key, generation, "issuing trend request");

        tokio::spawn(async move {
            let result = tokio::select! {
                () = token.cancelled() => return,
                result = fetch_trend_points(source.as_ref(), &key, range) => result,
            };
            if token.is_cancelled() {
                return;
            }
            if updates
                .send(TrendUpdate {
                    generation,
                    key,
                    result,
                })
                .is_err()
            {
                trace!(generation, "trend fetcher gone, dropping result");
            }
        });

        true
    }

    /// Wait for the next finished request
    ///
    /// The result still has to go through `apply`.
    pub async fn recv(&mut self) -> Option<TrendUpdate> {
        self.updates_rx.recv().await
    }

    /// Commit a finished request to the displayed state
    ///
    /// Returns `false` (and changes nothing) for superseded or cancelled requests.
    pub fn apply(&mut self, update: TrendUpdate) -> bool {
        if update.generation != self.generation || self.in_flight.is_none() {
            debug!(key = %update.key, "discarding superseded trend update");
            return false;
        }

        self.in_flight = None;
        self.state = match update.result {
            Ok(points) => {
                debug!(key = %update.key, years = points.len(), "trend data ready");
                TrendState::Ready(points)
            }
            Err(err) => {
                warn!(key = %update.key, error = %err, "trend request failed");
                TrendState::Failed(err.to_string())
            }
        };
        true
    }

    /// Apply every update already queued, without waiting
    ///
    /// Returns how many were accepted.
    pub fn apply_pending(&mut self) -> usize {
        let mut accepted = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            if self.apply(update) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Wait until the current request (if any) has been applied
    pub async fn settle(&mut self) {
        while self.in_flight.is_some() {
            match self.updates_rx.recv().await {
                Some(update) => {
                    self.apply(update);
                }
                None => break,
            }
        }
    }

    /// Cancel any in-flight request and forget the last key
    pub fn clear(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.last_key = None;
        self.state = TrendState::Idle;
    }

    #[must_use]
    pub const fn state(&self) -> &TrendState {
        &self.state
    }

    /// Displayed points, empty unless the last request succeeded
    #[must_use]
    pub fn points(&self) -> &[TrendPoint] {
        match &self.state {
            TrendState::Ready(points) => points,
            _ => &[],
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, TrendState::Loading)
    }

    #[must_use]
    pub const fn last_key(&self) -> Option<&WordKey> {
        self.last_key.as_ref()
    }

    #[must_use]
    pub const fn range(&self) -> YearRange {
        self.range
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

impl Drop for TrendFetcher {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::trends::NgramSeries;
    use async_trait::async_trait;
    use rustc_hash::FxHashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Source whose responses are held until the test releases them per key
    #[derive(Default)]
    pub(crate) struct GatedSource {
        gates: Mutex<FxHashMap<String, Arc<Notify>>>,
        calls: AtomicUsize,
    }

    impl GatedSource {
        fn gate(&self, key: &str) -> Arc<Notify> {
            let mut gates = self.gates.lock().unwrap();
            Arc::clone(gates.entry(key.to_string()).or_default())
        }

        pub(crate) fn release(&self, key: &str) {
            self.gate(key).notify_one();
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TrendSource for GatedSource {
        async fn fetch(
            &self,
            key: &WordKey,
            range: YearRange,
        ) -> Result<Vec<NgramSeries>, TrendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate(key.as_str()).notified().await;
            Ok(key
                .words()
                .iter()
                .enumerate()
                .map(|(i, word)| NgramSeries {
                    ngram: word.clone(),
                    timeseries: vec![(i + 1) as f64; range.len()],
                })
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TrendSource for FailingSource {
        async fn fetch(&self, _: &WordKey, _: YearRange) -> Result<Vec<NgramSeries>, TrendError> {
            Err(TrendError::Status(503))
        }
    }

    /// Succeeds for every key except the one it was built with
    struct FailsOn(&'static str);

    #[async_trait]
    impl TrendSource for FailsOn {
        async fn fetch(
            &self,
            key: &WordKey,
            range: YearRange,
        ) -> Result<Vec<NgramSeries>, TrendError> {
            if key.as_str() == self.0 {
                return Err(TrendError::Status(500));
            }
            Ok(key
                .words()
                .iter()
                .map(|word| NgramSeries {
                    ngram: word.clone(),
                    timeseries: vec![1.0; range.len()],
                })
                .collect())
        }
    }

    /// Bumps its counter when dropped
    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Never answers; counts fetches that were started and later abandoned
    #[derive(Default)]
    struct HangingSource {
        started: AtomicUsize,
        abandoned: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TrendSource for HangingSource {
        async fn fetch(&self, _: &WordKey, _: YearRange) -> Result<Vec<NgramSeries>, TrendError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _guard = DropCounter(Arc::clone(&self.abandoned));
            std::future::pending().await
        }
    }

    async fn let_tasks_run() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn gated() -> (Arc<GatedSource>, TrendFetcher) {
        let source = Arc::new(GatedSource::default());
        let fetcher = TrendFetcher::new(source.clone(), YearRange::default());
        (source, fetcher)
    }

    #[tokio::test]
    async fn request_then_settle_produces_points() {
        let (source, mut fetcher) = gated();

        assert!(fetcher.request(&["crane"]));
        assert!(fetcher.is_loading());
        source.release("crane");
        fetcher.settle().await;

        let points = fetcher.points();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].year, 2019);
        assert_eq!(points[6].year, 2025);
        assert!(points.iter().all(|p| p.value("crane") == 1.0));
    }

    #[tokio::test]
    async fn unchanged_key_is_not_refetched() {
        let (source, mut fetcher) = gated();

        assert!(fetcher.request(&["crane", "slate"]));
        source.release("crane,slate");
        fetcher.settle().await;

        assert!(!fetcher.request(&["crane", "slate", "crane"]));
        assert_eq!(source.calls(), 1);
        assert!(matches!(fetcher.state(), TrendState::Ready(_)));
    }

    #[tokio::test]
    async fn newer_key_supersedes_in_flight_request() {
        let (source, mut fetcher) = gated();

        assert!(fetcher.request(&["a", "b"]));
        assert!(fetcher.request(&["a", "b", "c"]));
        source.release("a,b");
        source.release("a,b,c");
        fetcher.settle().await;

        // Give the superseded task every chance to finish
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(fetcher.apply_pending(), 0);

        let points = fetcher.points();
        assert_eq!(points.len(), 7);
        let mut words: Vec<&str> = points[0].values.keys().map(String::as_str).collect();
        words.sort_unstable();
        assert_eq!(words, vec!["a", "b", "c"]);
        assert_eq!(fetcher.last_key().map(WordKey::as_str), Some("a,b,c"));
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let (_source, mut fetcher) = gated();

        fetcher.request(&["a"]);
        fetcher.request(&["b"]);

        let stale = TrendUpdate {
            generation: 1,
            key: WordKey::new(&["a"]),
            result: Ok(Vec::new()),
        };
        assert!(!fetcher.apply(stale));
        assert!(fetcher.is_loading());
    }

    #[tokio::test]
    async fn failure_clears_data_and_is_not_retried() {
        let mut fetcher = TrendFetcher::new(Arc::new(FailingSource), YearRange::default());

        assert!(fetcher.request(&["crane"]));
        fetcher.settle().await;

        assert_eq!(fetcher.state(), &TrendState::Failed("HTTP 503".to_string()));
        assert!(fetcher.points().is_empty());

        // Same key: no implicit retry
        assert!(!fetcher.request(&["crane"]));
        // New key: new attempt
        assert!(fetcher.request(&["slate"]));
    }

    #[tokio::test]
    async fn failure_replaces_previous_table() {
        let mut fetcher = TrendFetcher::new(Arc::new(FailsOn("slate")), YearRange::default());

        assert!(fetcher.request(&["crane"]));
        fetcher.settle().await;
        assert_eq!(fetcher.points().len(), 7);

        assert!(fetcher.request(&["slate"]));
        fetcher.settle().await;

        assert_eq!(fetcher.state(), &TrendState::Failed("HTTP 500".to_string()));
        assert!(fetcher.points().is_empty());
    }

    #[tokio::test]
    async fn dropping_fetcher_cancels_in_flight_request() {
        let source = Arc::new(HangingSource::default());
        let mut fetcher = TrendFetcher::new(source.clone(), YearRange::default());

        assert!(fetcher.request(&["crane"]));
        let_tasks_run().await;
        assert_eq!(source.started.load(Ordering::SeqCst), 1);
        assert_eq!(source.abandoned.load(Ordering::SeqCst), 0);

        drop(fetcher);
        let_tasks_run().await;
        assert_eq!(source.abandoned.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_key_cancels_and_resets() {
        let (source, mut fetcher) = gated();

        assert!(fetcher.request(&["crane"]));
        let none: [&str; 0] = [];
        assert!(!fetcher.request(&none));
        source.release("crane");

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(fetcher.apply_pending(), 0);
        assert_eq!(fetcher.state(), &TrendState::Idle);
        assert!(fetcher.last_key().is_none());

        // Forgotten key may be requested again
        assert!(fetcher.request(&["crane"]));
    }
}

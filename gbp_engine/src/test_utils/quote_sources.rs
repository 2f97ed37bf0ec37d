use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::traits::{PriceQuoteSource, QuoteError};

/// Always returns the same quotes, keyed by source id.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    quotes: HashMap<String, f64>,
    calls: Arc<AtomicUsize>,
}

impl StaticQuoteSource {
    pub fn new(quotes: &[(&str, f64)]) -> Self {
        let quotes = quotes.iter().map(|(id, p)| (id.to_string(), *p)).collect();
        Self { quotes, calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// How many times prices have been requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceQuoteSource for StaticQuoteSource {
    async fn fetch_usd_prices(&self, source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = source_ids
            .iter()
            .filter_map(|id| self.quotes.get(*id).map(|p| (id.to_string(), *p)))
            .collect();
        Ok(result)
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingQuoteSource(pub QuoteError);

impl PriceQuoteSource for FailingQuoteSource {
    async fn fetch_usd_prices(&self, _source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError> {
        Err(self.0.clone())
    }
}

/// Waits before delegating to the inner source. Used to simulate a hung feed, or to keep a cycle in flight.
#[derive(Debug, Clone)]
pub struct SlowQuoteSource<Q> {
    delay: Duration,
    inner: Q,
}

impl<Q> SlowQuoteSource<Q> {
    pub fn new(delay: Duration, inner: Q) -> Self {
        Self { delay, inner }
    }
}

impl<Q: PriceQuoteSource> PriceQuoteSource for SlowQuoteSource<Q> {
    async fn fetch_usd_prices(&self, source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_usd_prices(source_ids).await
    }
}

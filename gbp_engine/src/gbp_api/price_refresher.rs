//! The price refresher keeps the price store in line with the market.
//!
//! [`PriceRefresher::refresh_once`] runs one cycle and knows nothing about timers. The server runs it on an interval,
//! and admins can trigger it by hand. Both share one refresher, whose in-flight flag stops cycles from overlapping.
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use chrono::Utc;
use log::*;

use crate::{
    db_types::is_valid_price,
    gbp_api::{
        errors::RefreshError,
        refresh_objects::{RefreshOutcome, RefreshReport, TrackedAsset},
    },
    traits::{PriceQuoteSource, PriceStore, QuoteError},
};

pub const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(15);

pub struct PriceRefresher<S, Q> {
    store: S,
    source: Q,
    assets: Vec<TrackedAsset>,
    quote_timeout: Duration,
    in_flight: AtomicBool,
}

impl<S, Q> Debug for PriceRefresher<S, Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceRefresher({} assets)", self.assets.len())
    }
}

/// Clears the in-flight flag however the cycle ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok().map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S, Q> PriceRefresher<S, Q> {
    pub fn new(store: S, source: Q, assets: Vec<TrackedAsset>) -> Self {
        Self { store, source, assets, quote_timeout: DEFAULT_QUOTE_TIMEOUT, in_flight: AtomicBool::new(false) }
    }

    /// Bounds how long a cycle waits for the quote source before falling back.
    pub fn with_quote_timeout(mut self, timeout: Duration) -> Self {
        self.quote_timeout = timeout;
        self
    }

    pub fn assets(&self) -> &[TrackedAsset] {
        &self.assets
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl<S, Q> PriceRefresher<S, Q>
where
    S: PriceStore,
    Q: PriceQuoteSource,
{
    /// Runs one refresh cycle.
    ///
    /// Live prices are fetched for every tracked asset in one request. Any asset without a usable live price gets its
    /// fallback price instead, so every tracked symbol ends the cycle with a positive price. A failure to store one
    /// symbol is recorded in the report and does not stop the others.
    ///
    /// Returns [`RefreshError::AlreadyRunning`] if another cycle has not finished yet.
    pub async fn refresh_once(&self) -> Result<RefreshReport, RefreshError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            debug!("💱️ A price refresh is already running. Skipping this one.");
            RefreshError::AlreadyRunning
        })?;
        let started_at = Utc::now();
        let quotes = self.fetch_quotes().await;
        let mut outcomes = Vec::with_capacity(self.assets.len());
        for asset in &self.assets {
            let outcome = self.refresh_asset(asset, &quotes).await;
            outcomes.push((asset.symbol.clone(), outcome));
        }
        let report = RefreshReport { started_at, finished_at: Utc::now(), outcomes };
        info!(
            "💱️ Price refresh complete. {} live, {} fallback, {} failed",
            report.live_count(),
            report.fallback_count(),
            report.failed_count()
        );
        Ok(report)
    }

    async fn fetch_quotes(&self) -> Result<HashMap<String, f64>, QuoteError> {
        let ids = self.assets.iter().map(|a| a.source_id.as_str()).collect::<Vec<_>>();
        let result = match tokio::time::timeout(self.quote_timeout, self.source.fetch_usd_prices(&ids)).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::Network(format!("No response within {}s", self.quote_timeout.as_secs_f64()))),
        };
        if let Err(e) = &result {
            warn!("💱️ Could not fetch live prices. Fallback prices will be used for every asset. {e}");
        }
        result
    }

    async fn refresh_asset(
        &self,
        asset: &TrackedAsset,
        quotes: &Result<HashMap<String, f64>, QuoteError>,
    ) -> RefreshOutcome {
        let (price, fallback_reason) = match quotes {
            Ok(q) => match q.get(&asset.source_id) {
                Some(price) if is_valid_price(*price) => (*price, None),
                Some(price) => (asset.fallback_price, Some(format!("The feed quoted an unusable price: {price}"))),
                None => (asset.fallback_price, Some("The feed did not quote a price".to_string())),
            },
            Err(e) => (asset.fallback_price, Some(e.to_string())),
        };
        match self.store.upsert_price(&asset.symbol, price).await {
            Ok(_) => match fallback_reason {
                None => {
                    trace!("💱️ {} live price ${price} stored", asset.symbol);
                    RefreshOutcome::Live { price }
                },
                Some(reason) => {
                    warn!("💱️ {} is using its fallback price of ${price}. {reason}", asset.symbol);
                    RefreshOutcome::Fallback { price, reason }
                },
            },
            Err(e) => {
                error!("💱️ Could not store the price of {}: {e}", asset.symbol);
                RefreshOutcome::Failed { reason: e.to_string() }
            },
        }
    }
}

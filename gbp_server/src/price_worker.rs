use std::{sync::Arc, time::Duration};

use gbp_engine::{refresh_objects::RefreshReport, PriceRefresher, RefreshError, SqliteDatabase};
use gbp_price_feed::CoinGeckoApi;
use log::*;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

pub type SharedRefresher = Arc<PriceRefresher<SqliteDatabase, CoinGeckoApi>>;

/// Starts the price refresh worker. The first cycle runs straight away, and then once every `interval`.
/// Do not await the returned JoinHandle, as it will run indefinitely.
pub fn start_price_worker(refresher: SharedRefresher, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        // A slow cycle must not cause a burst of catch-up cycles
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("🕰️ Price refresh worker started. Prices are refreshed every {}s", interval.as_secs());
        loop {
            timer.tick().await;
            info!("🕰️ Running scheduled price refresh");
            match refresher.refresh_once().await {
                Ok(report) => log_report(&report),
                Err(RefreshError::AlreadyRunning) => {
                    info!("🕰️ A manual refresh is still running. Skipping this cycle.");
                },
            }
        }
    })
}

fn log_report(report: &RefreshReport) {
    info!(
        "🕰️ Price refresh done. {} live, {} fallback, {} failed",
        report.live_count(),
        report.fallback_count(),
        report.failed_count()
    );
    for (symbol, outcome) in &report.outcomes {
        debug!("🕰️ {symbol}: {outcome:?}");
    }
}

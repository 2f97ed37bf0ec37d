use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cryptocurrency whose price is kept up to date from the market data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedAsset {
    pub symbol: String,
    /// The id the price feed knows this asset by, e.g. "bitcoin"
    pub source_id: String,
    /// Used whenever the feed has no usable price for this asset
    pub fallback_price: f64,
}

impl TrackedAsset {
    pub fn new<S: Into<String>>(symbol: S, source_id: S, fallback_price: f64) -> Self {
        Self { symbol: symbol.into(), source_id: source_id.into(), fallback_price }
    }
}

pub fn default_tracked_assets() -> Vec<TrackedAsset> {
    vec![
        TrackedAsset::new("BTC", "bitcoin", 66_000.0),
        TrackedAsset::new("ETH", "ethereum", 3_000.0),
        TrackedAsset::new("BNB", "binancecoin", 550.0),
        TrackedAsset::new("TRX", "tron", 0.12),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum RefreshOutcome {
    /// The live market price was stored.
    Live { price: f64 },
    /// The fallback price was stored because the live price was unavailable.
    Fallback { price: f64, reason: String },
    /// Nothing could be stored for this symbol.
    Failed { reason: String },
}

impl RefreshOutcome {
    pub fn price(&self) -> Option<f64> {
        match self {
            RefreshOutcome::Live { price } | RefreshOutcome::Fallback { price, .. } => Some(*price),
            RefreshOutcome::Failed { .. } => None,
        }
    }
}

/// What happened to each tracked symbol during one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<(String, RefreshOutcome)>,
}

impl RefreshReport {
    pub fn outcome(&self, symbol: &str) -> Option<&RefreshOutcome> {
        self.outcomes.iter().find(|(s, _)| s == symbol).map(|(_, o)| o)
    }

    pub fn live_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| matches!(o, RefreshOutcome::Live { .. })).count()
    }

    pub fn fallback_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| matches!(o, RefreshOutcome::Fallback { .. })).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| matches!(o, RefreshOutcome::Failed { .. })).count()
    }
}

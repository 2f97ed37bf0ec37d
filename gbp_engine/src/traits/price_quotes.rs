use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("Could not reach the price source: {0}")]
    Network(String),
    #[error("The price source replied with status {0}")]
    Status(u16),
    #[error("Could not parse the price source response: {0}")]
    Parse(String),
}

/// A source of live market prices.
#[allow(async_fn_in_trait)]
pub trait PriceQuoteSource {
    /// Fetch the USD price for each of the given source ids in a single request.
    ///
    /// The returned map is keyed by source id. Ids that the source does not know about, or for which it returned
    /// something that is not a number, are simply absent from the map.
    async fn fetch_usd_prices(&self, source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError>;
}

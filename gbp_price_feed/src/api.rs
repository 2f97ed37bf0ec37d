use std::{collections::HashMap, sync::Arc};

use gbp_engine::{PriceQuoteSource, QuoteError};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde_json::Value;

use crate::{config::PriceFeedConfig, data_objects::parse_usd_prices, PriceFeedError};

pub const USER_AGENT: &str = "GlobalBusinessPay/1.0";

#[derive(Clone)]
pub struct CoinGeckoApi {
    config: PriceFeedConfig,
    client: Arc<Client>,
}

impl std::fmt::Debug for CoinGeckoApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoinGeckoApi({})", self.config.base_url)
    }
}

impl CoinGeckoApi {
    pub fn new(config: PriceFeedConfig) -> Result<Self, PriceFeedError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PriceFeedError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Fetches the USD price of each of the given CoinGecko ids in one request. Ids without a numeric quote are absent
    /// from the result.
    pub async fn simple_prices(&self, ids: &[&str]) -> Result<HashMap<String, f64>, PriceFeedError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids = ids.join(",");
        let url = self.url("/simple/price");
        trace!("💱️ Requesting prices for {ids} from {url}");
        let response = self
            .client
            .get(url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| PriceFeedError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(PriceFeedError::QueryError { status, message });
        }
        let body = response.json::<Value>().await.map_err(|e| PriceFeedError::JsonError(e.to_string()))?;
        let prices = parse_usd_prices(&body);
        debug!("💱️ Received {} prices from the feed", prices.len());
        Ok(prices)
    }
}

impl PriceQuoteSource for CoinGeckoApi {
    async fn fetch_usd_prices(&self, source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError> {
        let prices = self.simple_prices(source_ids).await?;
        Ok(prices)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    #[test]
    fn urls_are_built_from_the_base() {
        let api = CoinGeckoApi::new(PriceFeedConfig::default()).unwrap();
        assert_eq!(api.url("/simple/price"), "https://api.coingecko.com/api/v3/simple/price");
    }

    #[tokio::test]
    async fn no_ids_means_no_request() {
        let config = PriceFeedConfig::new("http://127.0.0.1:1", Duration::from_millis(100));
        let api = CoinGeckoApi::new(config).unwrap();
        assert!(api.simple_prices(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_feed_is_a_network_error() {
        let _ = env_logger::try_init();
        let config = PriceFeedConfig::new("http://127.0.0.1:1", Duration::from_millis(500));
        let api = CoinGeckoApi::new(config).unwrap();
        let err = api.fetch_usd_prices(&["bitcoin"]).await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)), "{err}");
    }
}

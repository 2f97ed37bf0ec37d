use std::time::Duration;

use gbp_common::helpers::parse_number;
use log::*;

pub const DEFAULT_PRICE_FEED_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_PRICE_FEED_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PriceFeedConfig {
    /// The API root, without a trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_PRICE_FEED_URL.to_string(), timeout: DEFAULT_PRICE_FEED_TIMEOUT }
    }
}

impl PriceFeedConfig {
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, timeout }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("GBP_PRICE_FEED_URL").ok().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
            info!("🪛️ GBP_PRICE_FEED_URL not set, using {DEFAULT_PRICE_FEED_URL}");
            DEFAULT_PRICE_FEED_URL.to_string()
        });
        let default_secs = DEFAULT_PRICE_FEED_TIMEOUT.as_secs();
        let timeout = parse_number(std::env::var("GBP_PRICE_FEED_TIMEOUT").ok(), default_secs).unwrap_or_else(|e| {
            warn!("🪛️ Invalid GBP_PRICE_FEED_TIMEOUT. {e} Using {default_secs}s instead.");
            default_secs
        });
        Self::new(base_url, Duration::from_secs(timeout))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = PriceFeedConfig::new("http://localhost:9000/api/v3/", Duration::from_secs(1));
        assert_eq!(config.base_url, "http://localhost:9000/api/v3");
    }
}

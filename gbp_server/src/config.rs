use std::{env, time::Duration};

use gbp_common::{
    helpers::{parse_boolean_flag, parse_number},
    Secret,
};
use gbp_price_feed::PriceFeedConfig;
use log::*;

const DEFAULT_GBP_HOST: &str = "127.0.0.1";
const DEFAULT_GBP_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/gbp_store.db";
const DEFAULT_PRICE_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
const DEFAULT_CHAT_REPLY_DELAY: Duration = Duration::from_millis(1000);
/// Extra time the refresher allows on top of the feed client's own request timeout.
const QUOTE_TIMEOUT_MARGIN: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Requests to admin routes must present this key. When it is empty, every admin request is refused.
    pub admin_api_key: Secret<String>,
    pub price_feed: PriceFeedConfig,
    /// The time between two scheduled price refreshes.
    pub price_refresh_interval: Duration,
    /// How long the support responder waits before replying to a chat message.
    pub chat_reply_delay: Duration,
    /// If true, the embedded migrations are run at start-up.
    pub run_migrations: bool,
    /// If true, empty card and cryptocurrency tables are filled with the seed data at start-up.
    pub seed_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GBP_HOST.to_string(),
            port: DEFAULT_GBP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            admin_api_key: Secret::default(),
            price_feed: PriceFeedConfig::default(),
            price_refresh_interval: DEFAULT_PRICE_REFRESH_INTERVAL,
            chat_reply_delay: DEFAULT_CHAT_REPLY_DELAY,
            run_migrations: true,
            seed_data: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    /// How long a refresh cycle waits for quotes before falling back. Slightly longer than the feed client's request
    /// timeout, so that a slow feed surfaces as the client's own error.
    pub fn quote_timeout(&self) -> Duration {
        self.price_feed.timeout + QUOTE_TIMEOUT_MARGIN
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("GBP_HOST").ok().unwrap_or_else(|| DEFAULT_GBP_HOST.into());
        let port = parse_number(env::var("GBP_PORT").ok(), DEFAULT_GBP_PORT).unwrap_or_else(|e| {
            error!("🪛️ Invalid value for GBP_PORT. {e} Using the default, {DEFAULT_GBP_PORT}, instead.");
            DEFAULT_GBP_PORT
        });
        let database_url = env::var("GBP_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ GBP_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let admin_api_key = Secret::new(env::var("GBP_ADMIN_API_KEY").unwrap_or_default());
        if admin_api_key.is_empty() {
            warn!(
                "🚨️ GBP_ADMIN_API_KEY is not set. The server will run, but every request to an admin route will be \
                 refused."
            );
        }
        let price_feed = PriceFeedConfig::new_from_env_or_default();
        let price_refresh_interval = configure_refresh_interval();
        let default_delay = DEFAULT_CHAT_REPLY_DELAY.as_millis() as u64;
        let delay_ms = parse_number(env::var("GBP_CHAT_REPLY_DELAY_MS").ok(), default_delay).unwrap_or_else(|e| {
            warn!("🪛️ Invalid value for GBP_CHAT_REPLY_DELAY_MS. {e} Using {default_delay} ms instead.");
            default_delay
        });
        let run_migrations = parse_boolean_flag(env::var("GBP_RUN_MIGRATIONS").ok(), true);
        let seed_data = parse_boolean_flag(env::var("GBP_SEED_DATA").ok(), true);
        Self {
            host,
            port,
            database_url,
            admin_api_key,
            price_feed,
            price_refresh_interval,
            chat_reply_delay: Duration::from_millis(delay_ms),
            run_migrations,
            seed_data,
        }
    }
}

fn configure_refresh_interval() -> Duration {
    let default_secs = DEFAULT_PRICE_REFRESH_INTERVAL.as_secs();
    let secs = env::var("GBP_PRICE_REFRESH_INTERVAL")
        .map_err(|_| {
            info!("🪛️ GBP_PRICE_REFRESH_INTERVAL is not set. Prices will be refreshed every {default_secs}s.")
        })
        .ok()
        .and_then(|s| match parse_number(Some(s), default_secs) {
            Ok(0) => {
                warn!("🪛️ GBP_PRICE_REFRESH_INTERVAL cannot be zero. Using {default_secs}s instead.");
                None
            },
            Ok(v) => Some(v),
            Err(e) => {
                warn!("🪛️ Invalid configuration value for GBP_PRICE_REFRESH_INTERVAL. {e}");
                None
            },
        })
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

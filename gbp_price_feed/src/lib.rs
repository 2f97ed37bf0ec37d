//! A small client for the CoinGecko "simple price" API.
//!
//! [`CoinGeckoApi`] implements the engine's [`PriceQuoteSource`](gbp_engine::PriceQuoteSource) trait, so it can be
//! handed straight to a [`PriceRefresher`](gbp_engine::PriceRefresher).
mod api;
mod config;
mod data_objects;
mod error;

pub use api::CoinGeckoApi;
pub use config::PriceFeedConfig;
pub use data_objects::parse_usd_prices;
pub use error::PriceFeedError;

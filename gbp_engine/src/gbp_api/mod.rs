//! # Storefront engine public API
//!
//! The `gbp_api` module exposes the programmatic API of the storefront engine. The API is modular, so that clients can
//! pick the pieces they need.
//!
//! * [`price_store_api`] reads and edits the payment currencies and their prices.
//! * [`catalog_api`] serves the card catalogue, priced in every active currency.
//! * [`order_flow_api`] takes checkout submissions and handles the admin review of orders.
//! * [`chat_flow_api`] stores support chat conversations.
//! * [`price_refresher`] keeps prices in line with the market.
//!
//! # API usage
//!
//! An API instance is created by supplying a backend that implements the storage traits the API needs.
//!
//! ```rust,ignore
//! use gbp_engine::{CatalogApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/gbp_store.db", 5).await?;
//! // SqliteDatabase implements CatalogManagement and PriceStore
//! let api = CatalogApi::new(db);
//! let cards = api.priced_cards().await?;
//! ```
pub mod catalog_api;
pub mod chat_flow_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod price_refresher;
pub mod price_store_api;
pub mod refresh_objects;

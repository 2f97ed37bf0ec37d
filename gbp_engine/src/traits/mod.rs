//! #  Storage and collaborator contracts
//!
//! This module defines the behaviour that backends need to expose in order to drive the storefront engine.
//!
//! * [`PriceStore`] keeps the latest USD price and wallet address of every supported cryptocurrency.
//! * [`CatalogManagement`] stores the card products.
//! * [`OrderManagement`] stores orders together with their receipts.
//! * [`ChatManagement`] stores support chat history.
//! * [`PriceQuoteSource`] is the external market data feed used by the price refresher.
//!
//! [`SqliteDatabase`](crate::SqliteDatabase) implements all the storage traits. Tests can use the in-memory fake in
//! `test_utils` instead.
mod catalog_management;
mod chat_management;
mod order_management;
mod price_quotes;
mod price_store;
mod store_error;

pub use catalog_management::CatalogManagement;
pub use chat_management::ChatManagement;
pub use order_management::OrderManagement;
pub use price_quotes::{PriceQuoteSource, QuoteError};
pub use price_store::PriceStore;
pub use store_error::StoreError;

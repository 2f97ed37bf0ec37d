//! Global Business Pay storefront engine
//!
//! The engine behind a storefront that sells Visa card products for cryptocurrency. It is independent of any web
//! framework.
//!
//! The library is divided into these sections:
//! 1. Storage ([`mod@traits`] and the SQLite backend). You should never need to touch the database directly. Use the
//!    public API instead. The data types used in the database are defined in [`mod@db_types`] and are public.
//! 2. The public API ([`mod@gbp_api`]): the price store, the card catalogue, order intake, the support chat and the
//!    price refresher.
//! 3. Pure logic with no I/O: the [`mod@pricing`] engine and the [`mod@chat`] responder.
//!
//! The engine also publishes events (see [`mod@events`]) when a chat message arrives or an order is created or
//! reviewed. Hooks registered for these events run on their own tasks.
pub mod chat;
pub mod db_types;
pub mod events;
pub mod gbp_api;
pub mod pricing;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use gbp_api::{
    catalog_api::CatalogApi,
    chat_flow_api::ChatFlowApi,
    errors::{ChatError, FieldError, OrderFlowError, RefreshError},
    order_flow_api::OrderFlowApi,
    order_objects,
    price_refresher::PriceRefresher,
    price_store_api::PriceStoreApi,
    refresh_objects,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{db::seed, SeedResult, SqliteDatabase};
pub use traits::{
    CatalogManagement,
    ChatManagement,
    OrderManagement,
    PriceQuoteSource,
    PriceStore,
    QuoteError,
    StoreError,
};

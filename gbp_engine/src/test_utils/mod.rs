//! Helpers for tests in this crate and in the crates that depend on it (through the `test_utils` feature).
mod memory_db;
pub mod prepare_env;
mod quote_sources;

pub use memory_db::MemoryDatabase;
pub use quote_sources::{FailingQuoteSource, SlowQuoteSource, StaticQuoteSource};

#![allow(dead_code)]
use std::collections::HashMap;

use gbp_engine::{PriceQuoteSource, QuoteError, SqliteDatabase};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/gbp_engine_test_{}.db", dir.display(), rand::random::<u64>())
}

/// A freshly migrated and seeded database in a temporary file.
pub async fn seeded_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_path();
    let db = SqliteDatabase::create_and_connect(&url, 5).await.expect("Error creating database");
    db.run_migrations().await.expect("Error running DB migrations");
    let seeded = db.seed().await.expect("Error seeding database");
    debug!("🚀️ Seeded {seeded:?} into {url}");
    db
}

pub async fn tear_down(db: SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        error!("🚀️ Failed to drop database {}: {e}", db.url());
    }
}

/// A price feed with canned answers. `None` means the feed is down.
pub struct CannedFeed(Option<HashMap<String, f64>>);

impl CannedFeed {
    pub fn quotes(quotes: &[(&str, f64)]) -> Self {
        Self(Some(quotes.iter().map(|(id, p)| (id.to_string(), *p)).collect()))
    }

    pub fn down() -> Self {
        Self(None)
    }
}

impl PriceQuoteSource for CannedFeed {
    async fn fetch_usd_prices(&self, source_ids: &[&str]) -> Result<HashMap<String, f64>, QuoteError> {
        let quotes = self.0.as_ref().ok_or_else(|| QuoteError::Network("connection refused".into()))?;
        Ok(source_ids.iter().filter_map(|id| quotes.get(*id).map(|p| (id.to_string(), *p))).collect())
    }
}

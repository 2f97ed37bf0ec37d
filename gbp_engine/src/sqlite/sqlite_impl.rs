//! `SqliteDatabase` is the production storage backend of the storefront engine.
//!
//! Unsurprisingly, it uses SQLite and implements all the storage traits defined in the [`traits`](crate::traits)
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

use super::db::{cards, cryptocurrencies, db_url, messages, new_pool, orders, receipts, seed, seed::SeedResult};
use crate::{
    db_types::{
        is_valid_price,
        normalize_symbol,
        Card,
        ChatMessage,
        Cryptocurrency,
        CryptocurrencyUpdate,
        NewCard,
        NewChatMessage,
        NewCryptocurrency,
        NewOrder,
        NewReceipt,
        Order,
        OrderStatusType,
        Receipt,
    },
    traits::{CatalogManagement, ChatManagement, OrderManagement, PriceStore, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl PriceStore for SqliteDatabase {
    async fn fetch_crypto(&self, symbol: &str) -> Result<Option<Cryptocurrency>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let crypto = cryptocurrencies::fetch_by_symbol(symbol, &mut conn).await?;
        Ok(crypto)
    }

    async fn fetch_all_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let cryptos = cryptocurrencies::fetch_all(false, &mut conn).await?;
        Ok(cryptos)
    }

    async fn fetch_active_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let cryptos = cryptocurrencies::fetch_all(true, &mut conn).await?;
        Ok(cryptos)
    }

    async fn upsert_price(&self, symbol: &str, usd_price: f64) -> Result<Cryptocurrency, StoreError> {
        if !is_valid_price(usd_price) {
            return Err(StoreError::InvalidPrice(usd_price));
        }
        let mut tx = self.pool.begin().await?;
        let crypto = cryptocurrencies::set_price(symbol, usd_price, &mut tx).await?;
        tx.commit().await?;
        crypto.ok_or_else(|| StoreError::NotFound(normalize_symbol(symbol)))
    }

    async fn create_crypto(&self, crypto: NewCryptocurrency) -> Result<Cryptocurrency, StoreError> {
        if !is_valid_price(crypto.usd_price) {
            return Err(StoreError::InvalidPrice(crypto.usd_price));
        }
        let mut tx = self.pool.begin().await?;
        let crypto = cryptocurrencies::insert(crypto, &mut tx).await?;
        tx.commit().await?;
        Ok(crypto)
    }

    async fn update_crypto(&self, id: i64, update: CryptocurrencyUpdate) -> Result<Cryptocurrency, StoreError> {
        if let Some(price) = update.usd_price {
            if !is_valid_price(price) {
                return Err(StoreError::InvalidPrice(price));
            }
        }
        let mut tx = self.pool.begin().await?;
        let crypto = cryptocurrencies::update(id, update, &mut tx).await?;
        tx.commit().await?;
        crypto.ok_or_else(|| StoreError::NotFound(format!("cryptocurrency #{id}")))
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_cards(&self) -> Result<Vec<Card>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let cards = cards::fetch_all(&mut conn).await?;
        Ok(cards)
    }

    async fn fetch_card(&self, id: i64) -> Result<Option<Card>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let card = cards::fetch_by_id(id, &mut conn).await?;
        Ok(card)
    }

    async fn create_card(&self, card: NewCard) -> Result<Card, StoreError> {
        if !is_valid_price(card.base_price_usd) {
            return Err(StoreError::InvalidPrice(card.base_price_usd));
        }
        let mut tx = self.pool.begin().await?;
        let card = cards::insert(card, &mut tx).await?;
        tx.commit().await?;
        Ok(card)
    }

    async fn update_card_price(&self, id: i64, base_price_usd: f64) -> Result<Card, StoreError> {
        if !is_valid_price(base_price_usd) {
            return Err(StoreError::InvalidPrice(base_price_usd));
        }
        let mut tx = self.pool.begin().await?;
        let card = cards::set_base_price(id, base_price_usd, &mut tx).await?;
        tx.commit().await?;
        card.ok_or_else(|| StoreError::NotFound(format!("card #{id}")))
    }
}

impl OrderManagement for SqliteDatabase {
    /// Takes a new order and its receipt, and in a single atomic transaction,
    /// * stores the receipt file,
    /// * stores the order as `pending`, pointing at the receipt.
    async fn insert_order(&self, order: NewOrder, receipt: NewReceipt) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;
        let receipt_id = receipts::insert(receipt, &mut tx).await?;
        trace!("🗃️ Receipt #{receipt_id} saved");
        let order = orders::insert_order(order, receipt_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} and receipt #{receipt_id} committed", order.id);
        Ok(order)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_all(&mut conn).await?;
        Ok(orders)
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::set_status(id, status, &mut tx).await?;
        tx.commit().await?;
        order.ok_or_else(|| StoreError::NotFound(format!("order #{id}")))
    }

    async fn fetch_receipt(&self, id: i64) -> Result<Option<Receipt>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let receipt = receipts::fetch_by_id(id, &mut conn).await?;
        Ok(receipt)
    }
}

impl ChatManagement for SqliteDatabase {
    async fn insert_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut tx = self.pool.begin().await?;
        let message = messages::insert(message, &mut tx).await?;
        tx.commit().await?;
        Ok(message)
    }

    async fn fetch_messages(&self, browser_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let messages = messages::fetch_for_browser(browser_id, &mut conn).await?;
        Ok(messages)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `GBP_DATABASE_URL`
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Creates the database file if it does not exist yet, and then connects to it.
    pub async fn create_and_connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        if !Sqlite::database_exists(url).await? {
            info!("🗃️ Creating new database at {url}");
            Sqlite::create_database(url).await?;
        }
        Self::new_with_url(url, max_connections).await
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs the migrations that are embedded in this crate.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    /// Inserts the seed catalogue and cryptocurrencies into empty tables.
    pub async fn seed(&self) -> Result<SeedResult, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = seed::seed_if_empty(&mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    /// Closes every connection in the pool. Pending queries are allowed to finish.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("🗃️ Connection pool for {} closed", self.url);
    }
}

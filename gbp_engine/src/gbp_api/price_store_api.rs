//! `PriceStoreApi` validates and logs every change to the set of payment currencies.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{is_valid_price, normalize_symbol, Cryptocurrency, CryptocurrencyUpdate, NewCryptocurrency},
    traits::{PriceStore, StoreError},
};

pub struct PriceStoreApi<B> {
    db: B,
}

impl<B> Debug for PriceStoreApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceStoreApi")
    }
}

impl<B> PriceStoreApi<B>
where B: PriceStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn fetch_crypto(&self, symbol: &str) -> Result<Option<Cryptocurrency>, StoreError> {
        self.db.fetch_crypto(symbol).await
    }

    pub async fn fetch_all_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        self.db.fetch_all_cryptos().await
    }

    pub async fn fetch_active_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        self.db.fetch_active_cryptos().await
    }

    pub async fn upsert_price(&self, symbol: &str, usd_price: f64) -> Result<Cryptocurrency, StoreError> {
        if !is_valid_price(usd_price) {
            warn!("💱️ Refusing to set the price of {symbol} to {usd_price}");
            return Err(StoreError::InvalidPrice(usd_price));
        }
        let crypto = self.db.upsert_price(symbol, usd_price).await?;
        debug!("💱️ {} is now ${}", crypto.symbol, crypto.usd_price);
        Ok(crypto)
    }

    pub async fn create_crypto(&self, mut crypto: NewCryptocurrency) -> Result<Cryptocurrency, StoreError> {
        crypto.symbol = normalize_symbol(&crypto.symbol);
        if crypto.symbol.is_empty() || !crypto.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StoreError::InvalidInput(format!("'{}' is not a valid symbol", crypto.symbol)));
        }
        if crypto.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("The name cannot be empty".into()));
        }
        if crypto.wallet_address.trim().is_empty() {
            return Err(StoreError::InvalidInput("The wallet address cannot be empty".into()));
        }
        if !is_valid_price(crypto.usd_price) {
            return Err(StoreError::InvalidPrice(crypto.usd_price));
        }
        let crypto = self.db.create_crypto(crypto).await?;
        info!("💱️ New cryptocurrency {} ({}) added at ${}", crypto.symbol, crypto.name, crypto.usd_price);
        Ok(crypto)
    }

    /// Applies an admin edit. Blank names or addresses are rejected, and so are invalid prices.
    pub async fn update_crypto(&self, id: i64, update: CryptocurrencyUpdate) -> Result<Cryptocurrency, StoreError> {
        if matches!(&update.name, Some(n) if n.trim().is_empty()) {
            return Err(StoreError::InvalidInput("The name cannot be empty".into()));
        }
        if matches!(&update.wallet_address, Some(a) if a.trim().is_empty()) {
            return Err(StoreError::InvalidInput("The wallet address cannot be empty".into()));
        }
        if let Some(price) = update.usd_price {
            if !is_valid_price(price) {
                return Err(StoreError::InvalidPrice(price));
            }
        }
        let crypto = self.db.update_crypto(id, update).await?;
        info!(
            "💱️ Cryptocurrency {} updated. Price: ${}, active: {}, wallet: {}",
            crypto.symbol, crypto.usd_price, crypto.is_active, crypto.wallet_address
        );
        Ok(crypto)
    }
}

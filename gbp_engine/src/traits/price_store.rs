use crate::{
    db_types::{Cryptocurrency, CryptocurrencyUpdate, NewCryptocurrency},
    traits::StoreError,
};

/// The `PriceStore` holds the latest known USD price and wallet address for every supported cryptocurrency.
///
/// Symbols are case-insensitive. Implementations store them in upper case.
///
/// Writes touch a single row, so concurrent writes to the same symbol are serialized by the backend and the last write
/// wins. Writes for different symbols are independent of each other.
#[allow(async_fn_in_trait)]
pub trait PriceStore {
    /// Fetch the cryptocurrency with the given symbol. If it does not exist, `None` is returned.
    async fn fetch_crypto(&self, symbol: &str) -> Result<Option<Cryptocurrency>, StoreError>;

    /// Fetch every cryptocurrency, active or not, ordered by symbol.
    async fn fetch_all_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError>;

    /// Fetch the cryptocurrencies that are currently accepted at checkout, ordered by symbol.
    async fn fetch_active_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError>;

    /// Set the USD price of `symbol` and stamp `last_updated`.
    ///
    /// Fails with [`StoreError::NotFound`] if the symbol is unknown and [`StoreError::InvalidPrice`] if the price is
    /// not finite and positive.
    async fn upsert_price(&self, symbol: &str, usd_price: f64) -> Result<Cryptocurrency, StoreError>;

    /// Add a new cryptocurrency. Fails with [`StoreError::AlreadyExists`] if the symbol is taken.
    async fn create_crypto(&self, crypto: NewCryptocurrency) -> Result<Cryptocurrency, StoreError>;

    /// Apply a partial update to the cryptocurrency with the given id.
    async fn update_crypto(&self, id: i64, update: CryptocurrencyUpdate) -> Result<Cryptocurrency, StoreError>;
}

//! Initial catalogue and payment currencies for a fresh database.
use log::info;
use sqlx::SqliteConnection;

use super::{cards, cryptocurrencies};
use crate::{
    db_types::{NewCard, NewCryptocurrency},
    traits::StoreError,
};

const EVM_WALLET: &str = "0xf8F9a26aDaEba581099425eCF3Bd52BD19C19e79";

pub fn seed_cryptocurrencies() -> Vec<NewCryptocurrency> {
    vec![
        NewCryptocurrency::new("BNB", "Binance Coin", 605.30, EVM_WALLET),
        NewCryptocurrency::new("BTC", "Bitcoin", 62541.20, "bc1qqekeu35xdqfdnscgdpk2xshhzcaku236wwpsd8"),
        NewCryptocurrency::new("ETH", "Ethereum", 3051.80, EVM_WALLET),
        NewCryptocurrency::new("TRX", "Tron", 0.1183, "TBUdsnLerVjPnxHahrJnNJmpcJ75c9Kr1e"),
    ]
}

pub fn seed_cards() -> Vec<NewCard> {
    vec![
        NewCard::new("Basic Premium Visa", 500.0, "https://i.imgur.com/MxMIwJb.png")
            .with_description("Entry level card with essential benefits"),
        NewCard::new("Gold Visa", 1000.0, "https://i.imgur.com/ZKlpSSb.jpg")
            .with_description("Premium card with enhanced benefits"),
        NewCard::new("Platinum Visa", 1500.0, "https://i.imgur.com/egjhEpm.png")
            .with_description("Exclusive card with premium benefits"),
        NewCard::new("World Visa", 2000.0, "https://i.imgur.com/u8Q6OlU.png")
            .with_description("Global acceptance with exclusive perks"),
        NewCard::new("World Elite Visa", 2500.0, "https://i.imgur.com/hZMQes2.png")
            .with_description("Elite status with maximum benefits"),
        NewCard::new("Business Visa", 3000.0, "https://i.imgur.com/BXk3lZ8.jpg")
            .with_description("Designed for business expenses with premium features"),
    ]
}

/// The number of records written by [`seed_if_empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedResult {
    pub cryptocurrencies: usize,
    pub cards: usize,
}

/// Inserts the seed cryptocurrencies and cards into each table that is still empty. Tables with existing rows are left
/// alone, so this is safe to call on every start-up.
pub async fn seed_if_empty(conn: &mut SqliteConnection) -> Result<SeedResult, StoreError> {
    let mut result = SeedResult::default();
    if cryptocurrencies::count(conn).await? == 0 {
        for crypto in seed_cryptocurrencies() {
            cryptocurrencies::insert(crypto, conn).await?;
            result.cryptocurrencies += 1;
        }
        info!("🗃️ Seeded {} cryptocurrencies", result.cryptocurrencies);
    }
    if cards::count(conn).await? == 0 {
        for card in seed_cards() {
            cards::insert(card, conn).await?;
            result.cards += 1;
        }
        info!("🗃️ Seeded {} cards", result.cards);
    }
    Ok(result)
}

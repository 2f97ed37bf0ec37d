use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{is_valid_price, Card, NewCard},
    pricing::{price_card, PricedCard},
    traits::{CatalogManagement, PriceStore, StoreError},
};

/// `CatalogApi` serves the card catalogue, priced in every active cryptocurrency.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement + PriceStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn fetch_cards(&self) -> Result<Vec<Card>, StoreError> {
        self.db.fetch_cards().await
    }

    pub async fn fetch_card(&self, id: i64) -> Result<Option<Card>, StoreError> {
        self.db.fetch_card(id).await
    }

    /// Every card, annotated with its price in each active cryptocurrency at the current rates.
    pub async fn priced_cards(&self) -> Result<Vec<PricedCard>, StoreError> {
        let cryptos = self.db.fetch_active_cryptos().await?;
        let cards = self.db.fetch_cards().await?;
        trace!("💱️ Pricing {} cards in {} currencies", cards.len(), cryptos.len());
        Ok(cards.into_iter().map(|c| price_card(c, &cryptos)).collect())
    }

    pub async fn priced_card(&self, id: i64) -> Result<Option<PricedCard>, StoreError> {
        let card = match self.db.fetch_card(id).await? {
            Some(card) => card,
            None => return Ok(None),
        };
        let cryptos = self.db.fetch_active_cryptos().await?;
        Ok(Some(price_card(card, &cryptos)))
    }

    pub async fn create_card(&self, card: NewCard) -> Result<Card, StoreError> {
        if card.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("The card name cannot be empty".into()));
        }
        if !is_valid_price(card.base_price_usd) {
            return Err(StoreError::InvalidPrice(card.base_price_usd));
        }
        let card = self.db.create_card(card).await?;
        info!("💱️ Card '{}' added at ${}", card.name, card.base_price_usd);
        Ok(card)
    }

    pub async fn update_card_price(&self, id: i64, base_price_usd: f64) -> Result<Card, StoreError> {
        if !is_valid_price(base_price_usd) {
            return Err(StoreError::InvalidPrice(base_price_usd));
        }
        let card = self.db.update_card_price(id, base_price_usd).await?;
        info!("💱️ The base price of '{}' is now ${}", card.name, card.base_price_usd);
        Ok(card)
    }
}

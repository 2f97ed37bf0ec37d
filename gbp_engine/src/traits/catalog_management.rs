use crate::{
    db_types::{Card, NewCard},
    traits::StoreError,
};

/// Storage for the card catalogue.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn fetch_cards(&self) -> Result<Vec<Card>, StoreError>;

    async fn fetch_card(&self, id: i64) -> Result<Option<Card>, StoreError>;

    async fn create_card(&self, card: NewCard) -> Result<Card, StoreError>;

    /// Change the USD base price of a card. Fails with [`StoreError::NotFound`] if there is no such card.
    async fn update_card_price(&self, id: i64, base_price_usd: f64) -> Result<Card, StoreError>;
}

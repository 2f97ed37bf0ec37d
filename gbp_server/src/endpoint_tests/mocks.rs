use gbp_engine::{
    db_types::{
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
    CatalogManagement,
    ChatManagement,
    OrderManagement,
    PriceStore,
    StoreError,
};
use mockall::mock;

mock! {
    pub Store {}
    impl PriceStore for Store {
        async fn fetch_crypto(&self, symbol: &str) -> Result<Option<Cryptocurrency>, StoreError>;
        async fn fetch_all_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError>;
        async fn fetch_active_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError>;
        async fn upsert_price(&self, symbol: &str, usd_price: f64) -> Result<Cryptocurrency, StoreError>;
        async fn create_crypto(&self, crypto: NewCryptocurrency) -> Result<Cryptocurrency, StoreError>;
        async fn update_crypto(&self, id: i64, update: CryptocurrencyUpdate) -> Result<Cryptocurrency, StoreError>;
    }
    impl CatalogManagement for Store {
        async fn fetch_cards(&self) -> Result<Vec<Card>, StoreError>;
        async fn fetch_card(&self, id: i64) -> Result<Option<Card>, StoreError>;
        async fn create_card(&self, card: NewCard) -> Result<Card, StoreError>;
        async fn update_card_price(&self, id: i64, base_price_usd: f64) -> Result<Card, StoreError>;
    }
    impl OrderManagement for Store {
        async fn insert_order(&self, order: NewOrder, receipt: NewReceipt) -> Result<Order, StoreError>;
        async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;
        async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError>;
        async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, StoreError>;
        async fn fetch_receipt(&self, id: i64) -> Result<Option<Receipt>, StoreError>;
    }
    impl ChatManagement for Store {
        async fn insert_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;
        async fn fetch_messages(&self, browser_id: &str) -> Result<Vec<ChatMessage>, StoreError>;
    }
}

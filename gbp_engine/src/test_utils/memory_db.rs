use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::Utc;

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
    seed,
    traits::{CatalogManagement, ChatManagement, OrderManagement, PriceStore, StoreError},
};

#[derive(Debug, Default)]
struct MemoryState {
    cryptos: Vec<Cryptocurrency>,
    cards: Vec<Card>,
    orders: Vec<Order>,
    receipts: Vec<Receipt>,
    messages: Vec<ChatMessage>,
    failing_symbols: HashSet<String>,
    fail_order_inserts: bool,
}

/// An in-memory storage backend for tests. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding the same cards and cryptocurrencies a freshly seeded database has.
    pub fn seeded() -> Self {
        let db = Self::new();
        {
            let mut state = db.lock();
            for (i, c) in seed::seed_cryptocurrencies().into_iter().enumerate() {
                state.cryptos.push(new_crypto(i as i64 + 1, c));
            }
            for (i, c) in seed::seed_cards().into_iter().enumerate() {
                state.cards.push(new_card(i as i64 + 1, c));
            }
        }
        db
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("MemoryDatabase lock poisoned")
    }

    /// Makes every price write for `symbol` fail with a database error.
    pub fn fail_price_updates_for(&self, symbol: &str) {
        self.lock().failing_symbols.insert(normalize_symbol(symbol));
    }

    /// Makes every order insert fail with a database error.
    pub fn fail_order_inserts(&self) {
        self.lock().fail_order_inserts = true;
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn receipt_count(&self) -> usize {
        self.lock().receipts.len()
    }

    /// Overwrites a price without any validation, to simulate a corrupted store.
    pub fn force_price(&self, symbol: &str, usd_price: f64) {
        let symbol = normalize_symbol(symbol);
        if let Some(c) = self.lock().cryptos.iter_mut().find(|c| c.symbol == symbol) {
            c.usd_price = usd_price;
        }
    }
}

fn new_crypto(id: i64, c: NewCryptocurrency) -> Cryptocurrency {
    Cryptocurrency {
        id,
        symbol: normalize_symbol(&c.symbol),
        name: c.name,
        usd_price: c.usd_price,
        wallet_address: c.wallet_address,
        is_active: c.is_active,
        last_updated: Utc::now(),
    }
}

fn new_card(id: i64, c: NewCard) -> Card {
    Card { id, name: c.name, description: c.description, base_price_usd: c.base_price_usd, image_url: c.image_url }
}

fn sorted_by_symbol(mut cryptos: Vec<Cryptocurrency>) -> Vec<Cryptocurrency> {
    cryptos.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    cryptos
}

impl PriceStore for MemoryDatabase {
    async fn fetch_crypto(&self, symbol: &str) -> Result<Option<Cryptocurrency>, StoreError> {
        let symbol = normalize_symbol(symbol);
        Ok(self.lock().cryptos.iter().find(|c| c.symbol == symbol).cloned())
    }

    async fn fetch_all_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        Ok(sorted_by_symbol(self.lock().cryptos.clone()))
    }

    async fn fetch_active_cryptos(&self) -> Result<Vec<Cryptocurrency>, StoreError> {
        let active = self.lock().cryptos.iter().filter(|c| c.is_active).cloned().collect();
        Ok(sorted_by_symbol(active))
    }

    async fn upsert_price(&self, symbol: &str, usd_price: f64) -> Result<Cryptocurrency, StoreError> {
        if !is_valid_price(usd_price) {
            return Err(StoreError::InvalidPrice(usd_price));
        }
        let symbol = normalize_symbol(symbol);
        let mut state = self.lock();
        if state.failing_symbols.contains(&symbol) {
            return Err(StoreError::DatabaseError(format!("simulated failure writing {symbol}")));
        }
        let crypto =
            state.cryptos.iter_mut().find(|c| c.symbol == symbol).ok_or_else(|| StoreError::NotFound(symbol.clone()))?;
        crypto.usd_price = usd_price;
        crypto.last_updated = Utc::now();
        Ok(crypto.clone())
    }

    async fn create_crypto(&self, crypto: NewCryptocurrency) -> Result<Cryptocurrency, StoreError> {
        if !is_valid_price(crypto.usd_price) {
            return Err(StoreError::InvalidPrice(crypto.usd_price));
        }
        let mut state = self.lock();
        let symbol = normalize_symbol(&crypto.symbol);
        if state.cryptos.iter().any(|c| c.symbol == symbol) {
            return Err(StoreError::AlreadyExists(symbol));
        }
        let crypto = new_crypto(state.cryptos.len() as i64 + 1, crypto);
        state.cryptos.push(crypto.clone());
        Ok(crypto)
    }

    async fn update_crypto(&self, id: i64, update: CryptocurrencyUpdate) -> Result<Cryptocurrency, StoreError> {
        if let Some(price) = update.usd_price {
            if !is_valid_price(price) {
                return Err(StoreError::InvalidPrice(price));
            }
        }
        let mut state = self.lock();
        let crypto = state
            .cryptos
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("cryptocurrency #{id}")))?;
        if let Some(name) = update.name {
            crypto.name = name;
        }
        if let Some(price) = update.usd_price {
            crypto.usd_price = price;
            crypto.last_updated = Utc::now();
        }
        if let Some(address) = update.wallet_address {
            crypto.wallet_address = address;
        }
        if let Some(active) = update.is_active {
            crypto.is_active = active;
        }
        Ok(crypto.clone())
    }
}

impl CatalogManagement for MemoryDatabase {
    async fn fetch_cards(&self) -> Result<Vec<Card>, StoreError> {
        Ok(self.lock().cards.clone())
    }

    async fn fetch_card(&self, id: i64) -> Result<Option<Card>, StoreError> {
        Ok(self.lock().cards.iter().find(|c| c.id == id).cloned())
    }

    async fn create_card(&self, card: NewCard) -> Result<Card, StoreError> {
        let mut state = self.lock();
        let card = new_card(state.cards.len() as i64 + 1, card);
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card_price(&self, id: i64, base_price_usd: f64) -> Result<Card, StoreError> {
        let mut state = self.lock();
        let card =
            state.cards.iter_mut().find(|c| c.id == id).ok_or_else(|| StoreError::NotFound(format!("card #{id}")))?;
        card.base_price_usd = base_price_usd;
        Ok(card.clone())
    }
}

impl OrderManagement for MemoryDatabase {
    async fn insert_order(&self, order: NewOrder, receipt: NewReceipt) -> Result<Order, StoreError> {
        let mut state = self.lock();
        if state.fail_order_inserts {
            return Err(StoreError::DatabaseError("simulated failure inserting order".into()));
        }
        let now = Utc::now();
        let receipt_id = state.receipts.len() as i64 + 1;
        state.receipts.push(Receipt {
            id: receipt_id,
            file_name: receipt.file_name,
            mime_type: receipt.mime_type,
            size: receipt.data.len() as i64,
            data: receipt.data,
            created_at: now,
        });
        let order = Order {
            id: state.orders.len() as i64 + 1,
            card_id: order.card_id,
            full_name: order.full_name,
            email: order.email,
            account_number: order.account_number,
            gbp_id: order.gbp_id,
            crypto_symbol: order.crypto_symbol,
            crypto_amount: order.crypto_amount,
            crypto_address: order.crypto_address,
            receipt_id,
            status: OrderStatusType::Pending,
            created_at: now,
            updated_at: now,
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.lock().orders.iter().rev().cloned().collect())
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.lock().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, StoreError> {
        let mut state = self.lock();
        let order =
            state.orders.iter_mut().find(|o| o.id == id).ok_or_else(|| StoreError::NotFound(format!("order #{id}")))?;
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    async fn fetch_receipt(&self, id: i64) -> Result<Option<Receipt>, StoreError> {
        Ok(self.lock().receipts.iter().find(|r| r.id == id).cloned())
    }
}

impl ChatManagement for MemoryDatabase {
    async fn insert_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut state = self.lock();
        let message = ChatMessage {
            id: state.messages.len() as i64 + 1,
            browser_id: message.browser_id,
            content: message.content,
            sender: message.sender,
            created_at: Utc::now(),
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn fetch_messages(&self, browser_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self.lock().messages.iter().filter(|m| m.browser_id == browser_id).cloned().collect())
    }
}

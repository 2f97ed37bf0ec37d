use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use gbp_common::CryptoAmount;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

//--------------------------------------    Cryptocurrency     ---------------------------------------------------------
/// A supported payment currency, its latest USD price and the wallet that receives payments in it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Cryptocurrency {
    pub id: i64,
    /// Always upper case, e.g. "BTC"
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
    pub wallet_address: String,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

impl Cryptocurrency {
    /// True if the price can be used to derive crypto amounts.
    pub fn has_valid_price(&self) -> bool {
        is_valid_price(self.usd_price)
    }
}

/// Prices must be finite and strictly positive.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Symbols are case-insensitive and stored in upper case.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCryptocurrency {
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
    pub wallet_address: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewCryptocurrency {
    pub fn new<S: Into<String>>(symbol: &str, name: S, usd_price: f64, wallet_address: S) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            name: name.into(),
            usd_price,
            wallet_address: wallet_address.into(),
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A partial update of a cryptocurrency. The symbol can never be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptocurrencyUpdate {
    pub name: Option<String>,
    pub usd_price: Option<f64>,
    pub wallet_address: Option<String>,
    pub is_active: Option<bool>,
}

impl CryptocurrencyUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.usd_price.is_none() && self.wallet_address.is_none() && self.is_active.is_none()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, usd_price: f64) -> Self {
        self.usd_price = Some(usd_price);
        self
    }

    pub fn with_wallet_address<S: Into<String>>(mut self, address: S) -> Self {
        self.wallet_address = Some(address.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }
}

//--------------------------------------         Card          ---------------------------------------------------------
/// A card product. Crypto prices are derived from `base_price_usd` on every read and never stored.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price_usd: f64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    pub description: Option<String>,
    pub base_price_usd: f64,
    pub image_url: String,
}

impl NewCard {
    pub fn new<S: Into<String>>(name: S, base_price_usd: f64, image_url: S) -> Self {
        Self { name: name.into(), description: None, base_price_usd, image_url: image_url.into() }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been received and is waiting for an admin to check the receipt.
    Pending,
    /// An admin has matched the receipt against a payment.
    Verified,
    /// An admin has rejected the order.
    Rejected,
}

impl OrderStatusType {
    /// Only pending orders can change status, and only to one of the final states.
    pub fn can_transition_to(&self, next: OrderStatusType) -> bool {
        matches!((self, next), (Self::Pending, Self::Verified) | (Self::Pending, Self::Rejected))
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Verified => write!(f, "verified"),
            OrderStatusType::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub card_id: i64,
    pub full_name: String,
    pub email: String,
    pub account_number: String,
    pub gbp_id: Option<String>,
    pub crypto_symbol: String,
    /// The server-computed amount at the time of the order.
    pub crypto_amount: CryptoAmount,
    /// The wallet address the customer was asked to pay into.
    pub crypto_address: String,
    pub receipt_id: i64,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub card_id: i64,
    pub full_name: String,
    pub email: String,
    pub account_number: String,
    pub gbp_id: Option<String>,
    pub crypto_symbol: String,
    pub crypto_amount: CryptoAmount,
    pub crypto_address: String,
}

//--------------------------------------       Receipt         ---------------------------------------------------------
pub const MAX_RECEIPT_SIZE: usize = 10 * 1024 * 1024;
pub const RECEIPT_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "application/pdf"];

/// A proof-of-payment file uploaded with an order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Receipt {
    pub id: i64,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, PartialEq)]
pub struct NewReceipt {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for NewReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NewReceipt({}, {}, {} bytes)", self.file_name, self.mime_type, self.data.len())
    }
}

impl NewReceipt {
    pub fn new<S: Into<String>>(file_name: S, mime_type: S, data: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime_type: mime_type.into().to_ascii_lowercase(), data }
    }

    /// Describes what is wrong with the file, if anything.
    pub fn problem(&self) -> Option<String> {
        if !RECEIPT_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Some(format!(
                "Receipt must be a JPEG, PNG or PDF file, but {} was uploaded ({})",
                self.file_name, self.mime_type
            ));
        }
        if self.data.is_empty() {
            return Some("The receipt file is empty".into());
        }
        if self.data.len() > MAX_RECEIPT_SIZE {
            return Some(format!("The receipt file is larger than {} MB", MAX_RECEIPT_SIZE / (1024 * 1024)));
        }
        None
    }
}

//--------------------------------------     ChatMessage       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Support,
    Admin,
}

impl Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSender::User => write!(f, "user"),
            MessageSender::Support => write!(f, "support"),
            MessageSender::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub browser_id: String,
    pub content: String,
    pub sender: MessageSender,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub browser_id: String,
    pub content: String,
    pub sender: MessageSender,
}

impl NewChatMessage {
    pub fn new<S: Into<String>>(browser_id: S, content: S, sender: MessageSender) -> Self {
        Self { browser_id: browser_id.into(), content: content.into(), sender }
    }
}

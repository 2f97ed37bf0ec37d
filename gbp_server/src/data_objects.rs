use chrono::{DateTime, Utc};
use gbp_engine::{
    db_types::{Cryptocurrency, OrderStatusType},
    refresh_objects::RefreshReport,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusParams {
    pub status: OrderStatusType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCardPriceParams {
    #[serde(alias = "basePriceUsd")]
    pub base_price_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageParams {
    pub content: String,
}

/// A reply typed by an admin into a visitor's conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMessageParams {
    #[serde(alias = "browserId")]
    pub browser_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshPricesResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub report: RefreshReport,
    pub cryptocurrencies: Vec<Cryptocurrency>,
}

impl RefreshPricesResponse {
    pub fn new(report: RefreshReport, cryptocurrencies: Vec<Cryptocurrency>) -> Self {
        let message = if report.failed_count() == 0 {
            "Cryptocurrency prices refreshed successfully".to_string()
        } else {
            format!("Cryptocurrency prices refreshed. {} prices could not be stored", report.failed_count())
        };
        Self { message, timestamp: Utc::now(), report, cryptocurrencies }
    }
}

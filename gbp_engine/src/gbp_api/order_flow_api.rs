use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderStatusType, Receipt},
    events::{EventProducers, OrderCreatedEvent, OrderStatusChangedEvent},
    gbp_api::{
        errors::{FieldError, OrderFlowError},
        order_objects::OrderSubmission,
    },
    pricing::price_in,
    traits::{CatalogManagement, OrderManagement, PriceStore},
};

/// `OrderFlowApi` is the primary API for taking checkout submissions and for the admin review of the resulting
/// orders.
#[derive(Clone)]
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: CatalogManagement + PriceStore + OrderManagement
{
    /// Validate a checkout submission and record it as a `pending` order.
    ///
    /// The crypto amount is always recomputed from the current price of the chosen currency. A differing amount sent
    /// by the client is logged and otherwise ignored.
    ///
    /// The receipt and order are written in one transaction, so a failure leaves nothing behind. This call is not
    /// idempotent: submitting the same form twice creates two orders.
    pub async fn submit_order(&self, submission: OrderSubmission) -> Result<Order, OrderFlowError> {
        let card = self
            .db
            .fetch_card(submission.card_id)
            .await?
            .ok_or_else(|| OrderFlowError::NotFound(format!("Card #{}", submission.card_id)))?;
        let symbol = submission.crypto_symbol.trim();
        let crypto = match self.db.fetch_crypto(symbol).await? {
            Some(c) if c.is_active => c,
            Some(c) => {
                return Err(OrderFlowError::InvalidPaymentMethod(format!("{} is not accepted at the moment", c.symbol)))
            },
            None => return Err(OrderFlowError::InvalidPaymentMethod(format!("'{symbol}' is not a supported currency"))),
        };
        let amount = price_in(card.base_price_usd, &crypto).ok_or_else(|| {
            warn!("📦️ {} has an unusable price (${}). Refusing the order.", crypto.symbol, crypto.usd_price);
            OrderFlowError::InvalidPaymentMethod(format!("{} has no valid price at the moment", crypto.symbol))
        })?;
        if let Some(client_amount) = submission.client_amount {
            if !amount.matches(client_amount) {
                warn!(
                    "📦️ The client quoted {client_amount} {} for '{}', but the current amount is {amount}. The \
                     server amount will be used.",
                    crypto.symbol, card.name
                );
            }
        }
        let mut errors = submission.field_errors();
        let gbp_id = submission.normalized_gbp_id();
        let receipt = match submission.receipt {
            Some(receipt) => {
                if let Some(problem) = receipt.problem() {
                    errors.push(FieldError::new("receipt".to_string(), problem));
                }
                Some(receipt)
            },
            None => None,
        };
        if !errors.is_empty() {
            debug!("📦️ Order for '{}' rejected. {} invalid fields", card.name, errors.len());
            return Err(OrderFlowError::ValidationError(errors));
        }
        let receipt = receipt.ok_or(OrderFlowError::MissingReceipt)?;
        let new_order = NewOrder {
            card_id: card.id,
            full_name: submission.full_name.trim().to_string(),
            email: submission.email.trim().to_string(),
            account_number: submission.account_number.trim().to_string(),
            gbp_id,
            crypto_symbol: crypto.symbol.clone(),
            crypto_amount: amount,
            crypto_address: crypto.wallet_address.clone(),
        };
        let order = self
            .db
            .insert_order(new_order, receipt)
            .await
            .map_err(|e| OrderFlowError::PersistenceError(e.to_string()))?;
        info!(
            "📦️ Order #{} for '{}' received: {} {}",
            order.id, card.name, order.crypto_amount, order.crypto_symbol
        );
        self.call_order_created_hook(&order).await;
        Ok(order)
    }

    /// All orders, newest first.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders().await?;
        Ok(orders)
    }

    pub async fn fetch_order(&self, id: i64) -> Result<Order, OrderFlowError> {
        self.db.fetch_order(id).await?.ok_or_else(|| OrderFlowError::NotFound(format!("Order #{id}")))
    }

    /// Marks a pending order as verified or rejected. No other status change is allowed.
    pub async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderFlowError> {
        let order = self.fetch_order(id).await?;
        let old_status = order.status;
        if !old_status.can_transition_to(status) {
            debug!("📦️ Order #{id} cannot move from {old_status} to {status}");
            return Err(OrderFlowError::InvalidStatusTransition { from: old_status, to: status });
        }
        let order = self.db.update_order_status(id, status).await?;
        info!("📦️ Order #{id} is now {status}");
        for emitter in &self.producers.order_status_changed_producer {
            emitter.publish_event(OrderStatusChangedEvent::new(order.clone(), old_status)).await;
        }
        Ok(order)
    }

    pub async fn fetch_receipt(&self, id: i64) -> Result<Receipt, OrderFlowError> {
        self.db.fetch_receipt(id).await?.ok_or_else(|| OrderFlowError::NotFound(format!("Receipt #{id}")))
    }

    async fn call_order_created_hook(&self, order: &Order) {
        for emitter in &self.producers.order_created_producer {
            debug!("📦️ Notifying order created hook subscribers");
            emitter.publish_event(OrderCreatedEvent::new(order.clone())).await;
        }
    }
}

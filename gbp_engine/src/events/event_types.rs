use serde::{Deserialize, Serialize};

use crate::db_types::{ChatMessage, Order, OrderStatusType};

/// Published after a visitor's chat message has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceivedEvent {
    pub message: ChatMessage,
}

impl MessageReceivedEvent {
    pub fn new(message: ChatMessage) -> Self {
        Self { message }
    }
}

/// Published after a new order and its receipt have been committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order: Order,
}

impl OrderCreatedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Published after an admin has verified or rejected an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusChangedEvent {
    pub order: Order,
    pub old_status: OrderStatusType,
}

impl OrderStatusChangedEvent {
    pub fn new(order: Order, old_status: OrderStatusType) -> Self {
        Self { order, old_status }
    }
}

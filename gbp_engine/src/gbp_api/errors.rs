use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{db_types::OrderStatusType, traits::StoreError};

/// A problem with one field of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<S: Into<String>>(field: S, message: S) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("{0} was not found")]
    NotFound(String),
    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),
    #[error("Invalid order details. {}", describe_fields(.0))]
    ValidationError(Vec<FieldError>),
    #[error("A payment receipt is required")]
    MissingReceipt,
    #[error("Could not save the order. {0}")]
    PersistenceError(String),
    #[error("An order cannot go from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatusType, to: OrderStatusType },
}

impl From<StoreError> for OrderFlowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(s) => OrderFlowError::NotFound(s),
            e => OrderFlowError::PersistenceError(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    #[error("A price refresh is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Invalid chat message: {0}")]
    ValidationError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for ChatError {
    fn from(e: StoreError) -> Self {
        ChatError::DatabaseError(e.to_string())
    }
}

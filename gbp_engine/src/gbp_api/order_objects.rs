use once_cell::sync::Lazy;
use regex::Regex;

use crate::{db_types::NewReceipt, gbp_api::errors::FieldError};

pub const MAX_NAME_LENGTH: usize = 200;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A checkout form as submitted by a customer.
#[derive(Debug, Clone, Default)]
pub struct OrderSubmission {
    pub card_id: i64,
    pub full_name: String,
    pub email: String,
    pub account_number: String,
    /// Optional GlobalBusinessPay customer reference
    pub gbp_id: Option<String>,
    pub crypto_symbol: String,
    /// The amount the customer's browser displayed. Informational only; the server always recomputes it.
    pub client_amount: Option<f64>,
    pub receipt: Option<NewReceipt>,
}

impl OrderSubmission {
    pub fn new<S: Into<String>>(card_id: i64, full_name: S, email: S, account_number: S, crypto_symbol: S) -> Self {
        Self {
            card_id,
            full_name: full_name.into(),
            email: email.into(),
            account_number: account_number.into(),
            crypto_symbol: crypto_symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_gbp_id<S: Into<String>>(mut self, gbp_id: S) -> Self {
        self.gbp_id = Some(gbp_id.into());
        self
    }

    pub fn with_client_amount(mut self, amount: f64) -> Self {
        self.client_amount = Some(amount);
        self
    }

    pub fn with_receipt(mut self, receipt: NewReceipt) -> Self {
        self.receipt = Some(receipt);
        self
    }

    /// Checks the customer details and reports every offending field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let name = self.full_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("fullName", "Full name is required"));
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(FieldError::new("fullName", "Full name must be 200 characters or fewer"));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "A valid email address is required"));
        }
        if self.account_number.trim().is_empty() {
            errors.push(FieldError::new("accountNumber", "Account number is required"));
        }
        errors
    }

    /// The GBP id, or `None` if it was left blank.
    pub fn normalized_gbp_id(&self) -> Option<String> {
        self.gbp_id.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

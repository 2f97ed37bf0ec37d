use gbp_engine::QuoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceFeedError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Price request failed: {0}")]
    RequestError(String),
    #[error("Price feed returned error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
}

impl From<PriceFeedError> for QuoteError {
    fn from(e: PriceFeedError) -> Self {
        match e {
            PriceFeedError::Initialization(s) | PriceFeedError::RequestError(s) => QuoteError::Network(s),
            PriceFeedError::QueryError { status, .. } => QuoteError::Status(status),
            PriceFeedError::JsonError(s) => QuoteError::Parse(s),
        }
    }
}

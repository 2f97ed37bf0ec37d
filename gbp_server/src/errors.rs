use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use gbp_engine::{ChatError, FieldError, OrderFlowError, RefreshError, StoreError};
use log::error;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Browser ID not found")]
    MissingBrowserId,
    #[error("{message}")]
    ValidationError { message: String, fields: Vec<FieldError> },
    #[error("{0}")]
    Conflict(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ServerError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::ValidationError { message: message.into(), fields: vec![] }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::MissingBrowserId => StatusCode::BAD_REQUEST,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::FORBIDDEN,
                AuthError::AdminDisabled => StatusCode::FORBIDDEN,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::ValidationError { message, fields } if !fields.is_empty() => {
                json!({ "error": message, "fields": fields })
            },
            // Backend details stay in the logs
            Self::BackendError(e) => {
                error!("💻️ Backend error: {e}");
                json!({ "error": "An internal error occurred. Please try again later." })
            },
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("An admin token is required.")]
    MissingToken,
    #[error("The admin token is not valid.")]
    InvalidToken,
    #[error("Admin access has not been configured on this server.")]
    AdminDisabled,
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::NotFound(s) => Self::NoRecordFound(s),
            OrderFlowError::ValidationError(fields) => {
                Self::ValidationError { message: "Invalid order details".to_string(), fields }
            },
            OrderFlowError::InvalidPaymentMethod(_) | OrderFlowError::MissingReceipt => Self::validation(e.to_string()),
            OrderFlowError::InvalidStatusTransition { .. } => Self::Conflict(e.to_string()),
            OrderFlowError::PersistenceError(s) => Self::BackendError(s),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(s) => Self::NoRecordFound(s),
            StoreError::AlreadyExists(_) => Self::Conflict(e.to_string()),
            StoreError::InvalidPrice(_) | StoreError::InvalidInput(_) => Self::validation(e.to_string()),
            StoreError::DatabaseError(s) => Self::BackendError(s),
        }
    }
}

impl From<ChatError> for ServerError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::ValidationError(s) => Self::validation(s),
            ChatError::DatabaseError(s) => Self::BackendError(s),
        }
    }
}

impl From<RefreshError> for ServerError {
    fn from(e: RefreshError) -> Self {
        match e {
            RefreshError::AlreadyRunning => Self::Conflict(e.to_string()),
        }
    }
}

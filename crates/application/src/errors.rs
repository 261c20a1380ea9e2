//! Application Layer Errors
//!
//! Wraps the lower layers and maps every failure onto the message a user
//! should see.

use domain::errors::DomainError;
use llm::LlmError;
use storage::StorageError;
use thiserror::Error;

use crate::payment::PaymentError;

/// Shown when the network or local storage fails
pub const CONNECTIVITY_MESSAGE: &str = "Unable to connect to CatCloud.";

/// Shown in place of an assistant reply when the AI call fails
pub const ASSISTANT_FALLBACK_MESSAGE: &str =
    "I'm having trouble connecting to the feline cloud. Please try again later!";

/// Errors from the API client, remote or local
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP Error: {status}")]
    Http { status: u16 },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The local fallback has no handler for this route
    #[error("Unsupported endpoint: {method} {path}")]
    UnsupportedEndpoint { method: &'static str, path: String },

    #[error("Unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Main error type of the application layer
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation and business rules
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// AI unreachable or returned something unusable
    #[error("AI error: {0}")]
    Ai(#[from] LlmError),

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AppError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Text to show the user. Domain errors carry their own wording;
    /// infrastructure failures collapse into a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Storage(_) | Self::Api(_) => CONNECTIVITY_MESSAGE.to_string(),
            Self::Ai(e @ LlmError::MissingApiKey) => e.to_string(),
            Self::Ai(_) => ASSISTANT_FALLBACK_MESSAGE.to_string(),
            Self::Payment(e) => e.to_string(),
            Self::Configuration { message } => message.clone(),
        }
    }

    /// Get error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Storage(_) => "storage",
            Self::Api(_) => "api",
            Self::Ai(_) => "ai",
            Self::Payment(_) => "payment",
            Self::Configuration { .. } => "configuration",
        }
    }

    pub fn is_validation(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_validation_error() || e.is_business_rule_error(),
            Self::Payment(PaymentError::MissingCardField(_)) => true,
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let dup: AppError = DomainError::EmailAlreadyRegistered("a@b.co".into()).into();
        assert!(dup.user_message().contains("already registered"));
        assert!(dup.is_validation());

        let api: AppError = ApiError::Http { status: 502 }.into();
        assert_eq!(api.user_message(), CONNECTIVITY_MESSAGE);
        assert_eq!(api.category(), "api");

        let ai: AppError = LlmError::EmptyResponse.into();
        assert_eq!(ai.user_message(), ASSISTANT_FALLBACK_MESSAGE);

        let no_key: AppError = LlmError::MissingApiKey.into();
        assert!(no_key.user_message().contains("GEMINI_API_KEY"));

        let card: AppError = PaymentError::MissingCardField("Card number").into();
        assert_eq!(card.user_message(), "Card number is required");
        assert!(card.is_validation());
    }
}

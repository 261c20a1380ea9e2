//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, no storage or network failures

use thiserror::Error;

use crate::Coins;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Form validation: a required field was left blank
    #[error("{0} is required")]
    MissingField(String),

    /// Sign-up needs account name, email and cat name together
    #[error("Your name, email, and cat's name are all required!")]
    IncompleteSignUp,

    /// Form validation: email does not look like `name@host.tld`
    #[error("Please enter a valid email address.")]
    InvalidEmail(String),

    /// Business rule: one account per email
    #[error("This email is already registered. Please sign in.")]
    EmailAlreadyRegistered(String),

    #[error("User not found. Check your name/email or Sign Up!")]
    UserNotFound(String),

    /// Business rule: coin payments must be covered by the balance
    #[error("Not enough coins! Required {required}, available {available}")]
    InsufficientCoins { required: Coins, available: Coins },

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Unknown risk level: {0}")]
    InvalidRiskLevel(String),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Cat not found: {0}")]
    CatNotFound(String),

    #[error("Community not found: {0}")]
    CommunityNotFound(String),

    /// Operation requires an active session
    #[error("Please sign in first")]
    NotSignedIn,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn missing(field: impl Into<String>) -> Self {
        DomainError::MissingField(field.into())
    }

    /// Check if error is a form validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingField(_)
                | DomainError::IncompleteSignUp
                | DomainError::InvalidEmail(_)
                | DomainError::InvalidAmount
                | DomainError::InvalidRating(_)
                | DomainError::InvalidRiskLevel(_)
                | DomainError::EmptyMessage
        )
    }

    /// Check if error is a business rule violation
    pub fn is_business_rule_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmailAlreadyRegistered(_)
                | DomainError::InsufficientCoins { .. }
                | DomainError::NotSignedIn
        )
    }

    /// Check if error indicates missing data
    pub fn is_not_found_error(&self) -> bool {
        matches!(
            self,
            DomainError::UserNotFound(_)
                | DomainError::PostNotFound(_)
                | DomainError::ProductNotFound(_)
                | DomainError::CatNotFound(_)
                | DomainError::CommunityNotFound(_)
        )
    }

    pub fn category(&self) -> ErrorCategory {
        if self.is_validation_error() {
            ErrorCategory::Validation
        } else if self.is_business_rule_error() {
            ErrorCategory::BusinessRule
        } else if self.is_not_found_error() {
            ErrorCategory::NotFound
        } else {
            ErrorCategory::Other
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Business rule violations
    BusinessRule,
    /// Resource not found
    NotFound,
    Other,
}

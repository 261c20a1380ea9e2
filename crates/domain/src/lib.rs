//! Domain Layer - CatCircle business objects
//!
//! Contains only plain data and business rules:
//! - Entities: owners, cats, posts, communities, chat, mall, assistant messages
//! - Value Objects: match scores, risk levels
//! - Fixtures: the seed collections written on first run
//!
//! Nothing here talks to storage, the network or an AI provider.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod fixtures;
pub mod ids;
pub mod search;
pub mod value_objects;

pub use entities::{
    AdviceMetadata, AssistantMessage, AssistantRole, CatChallenge, CatProfile, ChatMessage,
    Comment, Community, Gender, OwnerProfile, PaymentMethod, Post, PostType, Product,
    ProductCategory, ProductReview, PurchaseRecord, RecommendedMatch,
};
pub use errors::{DomainError, DomainResult, ErrorCategory};
pub use ids::{new_id, now_millis};
pub use value_objects::{MatchScore, RiskLevel};

/// Epoch milliseconds, the timestamp unit of every stored record.
pub type Timestamp = i64;

/// In-app virtual currency amount.
pub type Coins = u64;

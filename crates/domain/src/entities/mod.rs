//! Domain Entities - records persisted in the CatCircle collections

mod assistant;
mod challenge;
mod chat;
mod community;
mod matching;
mod owner;
mod post;
mod product;

pub use assistant::{AdviceMetadata, AssistantMessage, AssistantRole};
pub use challenge::CatChallenge;
pub use chat::ChatMessage;
pub use community::Community;
pub use matching::RecommendedMatch;
pub use owner::{CatProfile, Gender, OwnerProfile};
pub use post::{normalize_tags, Comment, Post, PostType};
pub use product::{PaymentMethod, Product, ProductCategory, ProductReview, PurchaseRecord};

//! # Application Layer
//!
//! Coordinates the CatCircle client:
//! - `app` holds the in-memory state and boots it from the API client
//! - feature modules (`feed`, `chat`, `marketplace`, `profile`,
//!   `communities`) extend `CatCircleApp` with their operations
//! - `recommendation`, `advice`, `assistant` and `drafting` carry the
//!   matching and AI flows
//!
//! ## Dependency Direction
//!
//! ```text
//! application → domain, storage, llm, common
//! cli         → application
//! ```

pub mod advice;
pub mod api_client;
pub mod app;
pub mod assistant;
pub mod auth;
pub mod chat;
pub mod communities;
pub mod config;
pub mod drafting;
pub mod errors;
pub mod feed;
pub mod knowledge;
pub mod marketplace;
pub mod payment;
pub mod profile;
pub mod random;
pub mod recommendation;

pub use advice::{AdviceResponse, AdviceService};
pub use api_client::{ApiClient, Endpoint, Method};
pub use app::{open_db, AiModels, AppState, CatCircleApp};
pub use assistant::AssistantSession;
pub use auth::{AuthService, SignUpForm};
pub use config::AppConfig;
pub use drafting::{DraftOutcome, DraftStyle, DraftingService, TriageResult};
pub use errors::{ApiError, ApiResult, AppError, AppResult};
pub use feed::NewPost;
pub use payment::{CardDetails, PaymentFlow, PaymentStep};
pub use profile::{NewCat, ProfilePatch};
pub use random::{FixedRandom, RandomSource, SequenceRandom, ThreadRandom};
pub use recommendation::{MatchWeights, RecommendationScorer};

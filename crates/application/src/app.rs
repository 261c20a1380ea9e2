//! CatCircleApp - in-memory state of one signed-in client plus the services
//! that mutate it.
//!
//! Feature operations (feed, chat, marketplace, profile, communities) are
//! implemented as `impl CatCircleApp` blocks in their own modules.

use domain::entities::{
    AssistantMessage, CatChallenge, Community, OwnerProfile, Post, Product, PurchaseRecord,
};
use domain::{fixtures, DomainError};
use llm::{GenerativeModel, LlmError};
use std::sync::Arc;
use storage::local_db::ChatLog;
use storage::{LocalDb, SqliteStore};
use tracing::{debug, info, warn};

use crate::advice::AdviceService;
use crate::api_client::ApiClient;
use crate::assistant::{share_summary, AssistantSession};
use crate::auth::{AuthService, SignUpForm};
use crate::config::{AppConfig, AssistantConfig, StorageConfig};
use crate::drafting::DraftingService;
use crate::errors::{AppError, AppResult};
use crate::random::{RandomSource, ThreadRandom};
use crate::recommendation::RecommendationScorer;

/// Generative models used by the assistant (reasoning) and by drafting and
/// triage (fast)
#[derive(Clone)]
pub struct AiModels {
    pub reasoning: Arc<dyn GenerativeModel>,
    pub fast: Arc<dyn GenerativeModel>,
}

impl AiModels {
    /// Same model for both roles
    pub fn shared(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            reasoning: model.clone(),
            fast: model,
        }
    }

    /// Gemini models from config; `None` when no API key is configured
    pub fn gemini(config: &AssistantConfig) -> AppResult<Option<Self>> {
        if config.api_key.is_none() {
            debug!("No Gemini API key configured, AI features disabled");
            return Ok(None);
        }

        let reasoning = config.gemini_provider(&config.reasoning_model)?;
        let fast = reasoning.for_model(&config.fast_model);

        Ok(Some(Self {
            reasoning: Arc::new(reasoning),
            fast: Arc::new(fast),
        }))
    }
}

/// Everything the client shows, loaded at boot and after sign-in
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current_user: Option<OwnerProfile>,
    pub posts: Vec<Post>,
    pub communities: Vec<Community>,
    pub products: Vec<Product>,
    pub challenges: Vec<CatChallenge>,
    pub purchases: Vec<PurchaseRecord>,
    pub following: Vec<String>,
    pub direct_messages: ChatLog,
    pub group_messages: ChatLog,
}

impl AppState {
    fn clear_session(&mut self) {
        self.current_user = None;
        self.purchases.clear();
        self.following.clear();
        self.direct_messages.clear();
    }
}

pub struct CatCircleApp {
    pub(crate) config: AppConfig,
    pub(crate) db: LocalDb,
    pub(crate) api: ApiClient,
    auth: AuthService,
    ai: Option<AiModels>,
    assistant: AssistantSession,
    pub(crate) state: AppState,
}

/// SQLite file from config, or an in-memory store when no path is set
pub fn open_db(config: &StorageConfig) -> AppResult<LocalDb> {
    match &config.database_path {
        Some(path) => {
            let store = SqliteStore::open(path)?;
            Ok(LocalDb::new(Arc::new(store)))
        }
        None => Ok(LocalDb::in_memory()),
    }
}

impl CatCircleApp {
    /// Boot with thread-local jitter for matching
    pub async fn boot(config: AppConfig, db: LocalDb, ai: Option<AiModels>) -> AppResult<Self> {
        Self::boot_with_rng(config, db, ai, Arc::new(ThreadRandom)).await
    }

    /// Seed storage, load the shared collections, then restore the stored
    /// session if there is one
    pub async fn boot_with_rng(
        config: AppConfig,
        db: LocalDb,
        ai: Option<AiModels>,
        rng: Arc<dyn RandomSource>,
    ) -> AppResult<Self> {
        db.init()?;

        let scorer = RecommendationScorer::new(config.matching.clone(), rng);
        let api = ApiClient::new(config.api.clone(), db.clone(), scorer);

        let (posts, communities) = tokio::join!(api.get_posts(), api.get_communities());
        let state = AppState {
            posts: posts?,
            communities: communities?,
            products: db.products()?,
            challenges: fixtures::challenges(),
            group_messages: db.group_messages()?,
            ..AppState::default()
        };

        let mut app = Self {
            assistant: AssistantSession::new(config.assistant.history_window),
            auth: AuthService::new(db.clone()),
            config,
            db,
            api,
            ai,
            state,
        };

        if let Some(user_id) = app.db.current_user_id()? {
            match app.api.get_current_user(&user_id).await? {
                Some(user) => app.load_session(user).await?,
                None => {
                    warn!(user_id = %user_id, "Stored session points at an unknown user, signing out");
                    app.auth.sign_out()?;
                }
            }
        }

        info!(
            posts = app.state.posts.len(),
            communities = app.state.communities.len(),
            signed_in = app.state.current_user.is_some(),
            remote = app.api.is_remote(),
            "CatCircle booted"
        );
        Ok(app)
    }

    /// Per-user collections, fetched together and applied once all resolve
    async fn load_session(&mut self, user: OwnerProfile) -> AppResult<()> {
        let (purchases, following, messages) = tokio::join!(
            self.api.get_purchases(&user.id),
            self.api.get_following(&user.id),
            self.api.get_direct_messages(&user.id),
        );

        self.state.purchases = purchases?;
        self.state.following = following?;
        self.state.direct_messages = messages?;
        self.state.current_user = Some(user);
        Ok(())
    }

    pub async fn sign_in(&mut self, identifier: &str) -> AppResult<&OwnerProfile> {
        let user = self.auth.sign_in(identifier)?;
        self.load_session(user).await?;
        self.require_user()
    }

    pub async fn sign_up(&mut self, form: SignUpForm) -> AppResult<&OwnerProfile> {
        let user = self.auth.sign_up(form)?;
        self.load_session(user).await?;
        self.require_user()
    }

    pub fn sign_out(&mut self) -> AppResult<()> {
        self.auth.sign_out()?;
        self.state.clear_session();
        self.assistant = AssistantSession::new(self.config.assistant.history_window);
        Ok(())
    }

    /// Store the bearer token sent with remote API calls
    pub fn set_token(&self, token: Option<&str>) -> AppResult<()> {
        Ok(self.db.set_token(token)?)
    }

    pub fn current_user(&self) -> Option<&OwnerProfile> {
        self.state.current_user.as_ref()
    }

    pub(crate) fn require_user(&self) -> AppResult<&OwnerProfile> {
        self.state
            .current_user
            .as_ref()
            .ok_or_else(|| DomainError::NotSignedIn.into())
    }

    pub(crate) fn require_user_mut(&mut self) -> AppResult<&mut OwnerProfile> {
        self.state
            .current_user
            .as_mut()
            .ok_or_else(|| DomainError::NotSignedIn.into())
    }

    /// Push the signed-in profile back to the API. Failure is logged and
    /// the in-memory change stays.
    pub(crate) async fn sync_profile(&self) -> bool {
        let Some(user) = self.state.current_user.as_ref() else {
            return false;
        };
        match self.api.update_user(user).await {
            Ok(()) => true,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Failed to sync profile");
                false
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db(&self) -> &LocalDb {
        &self.db
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    fn models(&self) -> AppResult<&AiModels> {
        self.ai
            .as_ref()
            .ok_or(AppError::Ai(LlmError::MissingApiKey))
    }

    pub fn advice_service(&self) -> AppResult<AdviceService> {
        Ok(AdviceService::new(self.models()?.reasoning.clone()))
    }

    pub fn drafting_service(&self) -> AppResult<DraftingService> {
        Ok(DraftingService::new(self.models()?.fast.clone()))
    }

    pub fn assistant(&self) -> &AssistantSession {
        &self.assistant
    }

    /// Send a question to the assistant. Blank input yields `None`; AI
    /// failures become the fallback reply rather than an error.
    pub async fn ask_assistant(&mut self, input: &str) -> AppResult<Option<AssistantMessage>> {
        let advice = self.advice_service()?;
        let reply = self
            .assistant
            .send(&advice, input, &self.state.products)
            .await
            .cloned();
        Ok(reply)
    }

    /// Publish the latest assistant reply that carries advice as a
    /// CARE_TIPS post
    pub async fn share_last_advice(&mut self) -> AppResult<Option<Post>> {
        let author = self.require_user()?.clone();
        let post = self
            .assistant
            .messages()
            .iter()
            .rev()
            .filter(|m| !m.is_from_user())
            .find_map(|m| share_summary(m, &author));

        match post {
            Some(post) => Ok(Some(self.publish(post).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;
    use llm::ScriptedModel;

    async fn boot(db: LocalDb) -> CatCircleApp {
        CatCircleApp::boot_with_rng(AppConfig::for_tests(), db, None, Arc::new(FixedRandom(0)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_boot_without_session() {
        let app = boot(LocalDb::in_memory()).await;

        assert!(app.current_user().is_none());
        assert_eq!(app.state().posts.len(), fixtures::posts().len());
        assert_eq!(app.state().communities.len(), fixtures::communities().len());
        assert_eq!(app.state().products.len(), fixtures::products().len());
        assert_eq!(app.state().challenges.len(), 2);
    }

    #[tokio::test]
    async fn test_boot_restores_session() {
        let db = LocalDb::in_memory();
        db.init().unwrap();
        db.set_current_user_id(Some(fixtures::OWNER_ME_ID)).unwrap();
        db.save_following(fixtures::OWNER_ME_ID, &["owner_luna".to_string()])
            .unwrap();

        let app = boot(db).await;
        assert_eq!(app.current_user().unwrap().id, fixtures::OWNER_ME_ID);
        assert_eq!(app.state().following, vec!["owner_luna"]);
    }

    #[tokio::test]
    async fn test_dangling_session_is_cleared() {
        let db = LocalDb::in_memory();
        db.set_current_user_id(Some("owner_ghost")).unwrap();

        let app = boot(db.clone()).await;
        assert!(app.current_user().is_none());
        assert_eq!(db.current_user_id().unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_resets_session_state() {
        let mut app = boot(LocalDb::in_memory()).await;
        app.sign_in(&fixtures::owner_me().account_name).await.unwrap();
        assert!(app.current_user().is_some());

        app.sign_out().unwrap();
        assert!(app.current_user().is_none());
        assert!(app.state().following.is_empty());
        assert!(!app.state().posts.is_empty());
    }

    #[tokio::test]
    async fn test_ai_features_need_models() {
        let mut app = boot(LocalDb::in_memory()).await;
        assert!(!app.ai_enabled());
        assert!(matches!(
            app.ask_assistant("hello").await,
            Err(AppError::Ai(LlmError::MissingApiKey))
        ));
        assert!(app.drafting_service().is_err());
    }

    #[tokio::test]
    async fn test_gemini_models_need_key() {
        let config = AssistantConfig::default();
        assert!(AiModels::gemini(&config).unwrap().is_none());

        let config = AssistantConfig {
            api_key: Some("key".into()),
            ..AssistantConfig::default()
        };
        let models = AiModels::gemini(&config).unwrap().unwrap();
        assert_eq!(models.reasoning.model_name(), llm::DEFAULT_REASONING_MODEL);
        assert_eq!(models.fast.model_name(), llm::DEFAULT_FAST_MODEL);
    }

    #[tokio::test]
    async fn test_shared_models() {
        let model: Arc<dyn GenerativeModel> = Arc::new(ScriptedModel::new("scripted"));
        let models = AiModels::shared(model);
        assert_eq!(models.fast.model_name(), "scripted");
    }
}

//! REST-shaped client. With a base URL every call goes over HTTP; without
//! one the same routes are answered from local storage after a simulated
//! delay.

use common::OperationTimer;
use domain::entities::{Community, OwnerProfile, Post, PurchaseRecord, RecommendedMatch};
use domain::fixtures;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use storage::local_db::ChatLog;
use storage::LocalDb;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::recommendation::RecommendationScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routes understood by the local fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Posts,
    User(String),
    Communities,
    DiscoverMatches,
}

impl Endpoint {
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/posts" => Some(Endpoint::Posts),
            "/communities" => Some(Endpoint::Communities),
            "/discover/matches" => Some(Endpoint::DiscoverMatches),
            _ => path
                .strip_prefix("/users/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Endpoint::User(id.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Posts => "/posts".to_string(),
            Endpoint::User(id) => format!("/users/{}", id),
            Endpoint::Communities => "/communities".to_string(),
            Endpoint::DiscoverMatches => "/discover/matches".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    db: LocalDb,
    scorer: RecommendationScorer,
}

impl ApiClient {
    pub fn new(config: ApiConfig, db: LocalDb, scorer: RecommendationScorer) -> Self {
        Self {
            config,
            http: Client::new(),
            db,
            scorer,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.config.base_url.is_some()
    }

    /// Uniform entry point for every route
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        simulate_latency(self.config.latency()).await;

        let mut timer = OperationTimer::new("api_request");
        timer.add_field("method", method.as_str());
        timer.add_field("path", path);

        let result = match &self.config.base_url {
            Some(base_url) => self.remote(base_url, method, path, body).await,
            None => {
                debug!(%method, path, "Serving request from local storage");
                self.local(method, path, body)
            }
        };
        timer.finish_with_result(&result);

        Ok(serde_json::from_value(result?)?)
    }

    async fn remote(
        &self,
        base_url: &str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        let mut builder = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };
        if let Some(token) = self.db.token()? {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(%method, path, error = %e, "API request failed");
            ApiError::Transport(e)
        })?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!(%method, path, status, "API request failed");
            return Err(ApiError::Http { status });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn local(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let unsupported = || ApiError::UnsupportedEndpoint {
            method: method.as_str(),
            path: path.to_string(),
        };
        let endpoint = Endpoint::parse(path).ok_or_else(unsupported)?;

        match (method, endpoint) {
            (Method::Get, Endpoint::Posts) => Ok(serde_json::to_value(self.db.posts()?)?),
            (Method::Post, Endpoint::Posts) => {
                let post: Post = serde_json::from_value(body.unwrap_or(Value::Null))?;
                let mut posts = self.db.posts()?;
                posts.insert(0, post.clone());
                self.db.save_posts(&posts)?;
                Ok(serde_json::to_value(post)?)
            }
            (Method::Get, Endpoint::User(id)) => Ok(serde_json::to_value(self.db.user(&id)?)?),
            (Method::Put, Endpoint::User(_)) => {
                let user: OwnerProfile = serde_json::from_value(body.unwrap_or(Value::Null))?;
                self.db.save_user(&user)?;
                Ok(Value::Null)
            }
            (Method::Get, Endpoint::Communities) => {
                Ok(serde_json::to_value(self.db.communities()?)?)
            }
            (Method::Post, Endpoint::Communities) => {
                let community: Community = serde_json::from_value(body.unwrap_or(Value::Null))?;
                let mut communities = self.db.communities()?;
                communities.push(community.clone());
                self.db.save_communities(&communities)?;
                Ok(serde_json::to_value(community)?)
            }
            (Method::Get, Endpoint::DiscoverMatches) => {
                Ok(serde_json::to_value(self.local_matches()?)?)
            }
            _ => Err(unsupported()),
        }
    }

    /// Rank every stored user against the signed-in one (or the first user)
    fn local_matches(&self) -> ApiResult<Vec<RecommendedMatch>> {
        let users = self.db.users()?;
        let current_id = self.db.current_user_id()?;
        let me = current_id
            .as_deref()
            .and_then(|id| users.iter().find(|u| u.id == id))
            .or_else(|| users.first())
            .cloned()
            .unwrap_or_else(fixtures::owner_me);

        Ok(self.scorer.rank(&me, &users))
    }

    pub async fn get_current_user(&self, id: &str) -> ApiResult<Option<OwnerProfile>> {
        self.request(Method::Get, &Endpoint::User(id.to_string()).path(), None)
            .await
    }

    pub async fn update_user(&self, user: &OwnerProfile) -> ApiResult<()> {
        let _: Value = self
            .request(
                Method::Put,
                &Endpoint::User(user.id.clone()).path(),
                Some(serde_json::to_value(user)?),
            )
            .await?;
        Ok(())
    }

    pub async fn get_posts(&self) -> ApiResult<Vec<Post>> {
        self.request(Method::Get, &Endpoint::Posts.path(), None).await
    }

    pub async fn create_post(&self, post: &Post) -> ApiResult<Post> {
        self.request(
            Method::Post,
            &Endpoint::Posts.path(),
            Some(serde_json::to_value(post)?),
        )
        .await
    }

    pub async fn get_communities(&self) -> ApiResult<Vec<Community>> {
        self.request(Method::Get, &Endpoint::Communities.path(), None)
            .await
    }

    pub async fn create_community(&self, community: &Community) -> ApiResult<Community> {
        self.request(
            Method::Post,
            &Endpoint::Communities.path(),
            Some(serde_json::to_value(community)?),
        )
        .await
    }

    pub async fn get_recommended_matches(&self) -> ApiResult<Vec<RecommendedMatch>> {
        self.request(Method::Get, &Endpoint::DiscoverMatches.path(), None)
            .await
    }

    // Per-user collections are always local

    pub async fn get_direct_messages(&self, user_id: &str) -> ApiResult<ChatLog> {
        simulate_latency(Duration::from_millis(self.config.messages_latency_ms)).await;
        Ok(self.db.direct_messages(user_id)?)
    }

    pub async fn get_following(&self, user_id: &str) -> ApiResult<Vec<String>> {
        simulate_latency(Duration::from_millis(self.config.following_latency_ms)).await;
        Ok(self.db.following(user_id)?)
    }

    pub async fn save_following(&self, user_id: &str, ids: &[String]) -> ApiResult<()> {
        Ok(self.db.save_following(user_id, ids)?)
    }

    pub async fn get_purchases(&self, user_id: &str) -> ApiResult<Vec<PurchaseRecord>> {
        let purchases = self.db.purchases(user_id)?;
        simulate_latency(Duration::from_millis(self.config.purchases_latency_ms)).await;
        Ok(purchases)
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;
    use crate::recommendation::MatchWeights;
    use domain::entities::PostType;
    use std::sync::Arc;

    fn local_client() -> (ApiClient, LocalDb) {
        let db = LocalDb::in_memory();
        db.init().unwrap();
        let scorer = RecommendationScorer::new(MatchWeights::default(), Arc::new(FixedRandom(0)));
        (ApiClient::new(ApiConfig::instant(), db.clone(), scorer), db)
    }

    #[test]
    fn test_endpoint_parsing() {
        assert_eq!(Endpoint::parse("/posts"), Some(Endpoint::Posts));
        assert_eq!(
            Endpoint::parse("/users/owner_me"),
            Some(Endpoint::User("owner_me".into()))
        );
        assert_eq!(Endpoint::parse("/users/"), None);
        assert_eq!(Endpoint::parse("/users/a/b"), None);
        assert_eq!(Endpoint::parse("/shop"), None);
    }

    #[tokio::test]
    async fn test_local_post_is_prepended_and_persisted() {
        let (api, db) = local_client();
        let post = Post::new("owner_me", "cat_mochi", PostType::Daily, "Nap time");

        let created = api.create_post(&post).await.unwrap();
        assert_eq!(created, post);

        let posts = api.get_posts().await.unwrap();
        assert_eq!(posts[0].id, post.id);
        assert_eq!(db.posts().unwrap().len(), fixtures::posts().len() + 1);
    }

    #[tokio::test]
    async fn test_local_user_lookup() {
        let (api, _) = local_client();
        assert!(api.get_current_user(fixtures::OWNER_ME_ID).await.unwrap().is_some());
        assert!(api.get_current_user("owner_ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_local_route_is_error() {
        let (api, _) = local_client();
        let result: ApiResult<Value> = api.request(Method::Get, "/shop", None).await;
        assert!(matches!(result, Err(ApiError::UnsupportedEndpoint { .. })));

        let result: ApiResult<Value> = api.request(Method::Put, "/posts", None).await;
        assert!(matches!(result, Err(ApiError::UnsupportedEndpoint { method: "PUT", .. })));
    }

    #[tokio::test]
    async fn test_local_matches_exclude_current_user() {
        let (api, db) = local_client();
        db.set_current_user_id(Some(fixtures::OWNER_ME_ID)).unwrap();

        let matches = api.get_recommended_matches().await.unwrap();
        assert_eq!(matches.len(), fixtures::owners().len() - 1);
        assert!(matches.iter().all(|m| m.owner.id != fixtures::OWNER_ME_ID));
        assert!(matches
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }
}

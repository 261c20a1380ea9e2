//! Feed operations: posting, likes, comments, tips, search and follows

use domain::constants::POST_REWARD_COINS;
use domain::entities::{normalize_tags, CatChallenge, Comment, OwnerProfile, Post, PostType};
use domain::search::{filter_posts, resolve_owner};
use domain::{Coins, DomainError};
use tracing::{debug, info};

use crate::app::CatCircleApp;
use crate::errors::AppResult;

/// Always-on trending tag
pub const DEFAULT_TRENDING_TAG: &str = "Caturday";

/// Post as entered by the author
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub post_type: PostType,
    pub content: String,
    /// Defaults to the author's primary cat
    pub cat_id: Option<String>,
    pub tags: Vec<String>,
    pub media_url: Option<String>,
    pub community_id: Option<String>,
}

impl NewPost {
    pub fn new(post_type: PostType, content: impl Into<String>) -> Self {
        Self {
            post_type,
            content: content.into(),
            cat_id: None,
            tags: Vec::new(),
            media_url: None,
            community_id: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Build the post for `author`. Text or media must be present and a
    /// given cat must belong to the author.
    pub fn into_post(self, author: &OwnerProfile) -> AppResult<Post> {
        let has_media = self
            .media_url
            .as_deref()
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false);
        if self.content.trim().is_empty() && !has_media {
            return Err(DomainError::missing("Post content").into());
        }

        let cat_id = match self.cat_id {
            Some(id) => author
                .cat(&id)
                .map(|c| c.id.clone())
                .ok_or(DomainError::CatNotFound(id))?,
            None => author
                .primary_cat()
                .map(|c| c.id.clone())
                .unwrap_or_else(|| "unknown".to_string()),
        };

        let tags = normalize_tags(&self.tags, self.post_type);
        Ok(
            Post::new(author.id.clone(), cat_id, self.post_type, self.content.trim())
                .with_tags(tags)
                .with_media(self.media_url)
                .in_community(self.community_id),
        )
    }
}

/// "Caturday" followed by every active challenge tag without `#`
pub fn trending_tags(challenges: &[CatChallenge]) -> Vec<String> {
    std::iter::once(DEFAULT_TRENDING_TAG.to_string())
        .chain(
            challenges
                .iter()
                .filter(|c| c.is_active)
                .map(|c| c.bare_tag().to_string()),
        )
        .collect()
}

impl CatCircleApp {
    pub async fn create_post(&mut self, draft: NewPost) -> AppResult<Post> {
        let post = draft.into_post(self.require_user()?)?;
        self.publish(post).await
    }

    /// Send a built post to the API, prepend it to the feed and reward the
    /// author
    pub(crate) async fn publish(&mut self, post: Post) -> AppResult<Post> {
        self.require_user()?;
        let created = self.api.create_post(&post).await?;
        self.state.posts.insert(0, created.clone());

        let user = self.require_user_mut()?;
        user.credit(POST_REWARD_COINS);
        info!(
            post_id = %created.id,
            post_type = %created.post_type,
            balance = user.coin_balance,
            "Post published"
        );
        self.sync_profile().await;
        Ok(created)
    }

    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    pub fn post(&self, post_id: &str) -> AppResult<&Post> {
        self.state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()).into())
    }

    fn post_mut(&mut self, post_id: &str) -> AppResult<&mut Post> {
        self.state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()).into())
    }

    /// Likes, comments and tips live in the local posts collection
    fn persist_posts(&self) -> AppResult<()> {
        if self.api.is_remote() {
            debug!("Remote backend, feed engagement kept in memory");
            return Ok(());
        }
        Ok(self.db.save_posts(&self.state.posts)?)
    }

    pub fn like_post(&mut self, post_id: &str) -> AppResult<u64> {
        let post = self.post_mut(post_id)?;
        post.like();
        let likes = post.likes;
        self.persist_posts()?;
        Ok(likes)
    }

    pub fn comment_on_post(&mut self, post_id: &str, text: &str) -> AppResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }
        let comment = Comment::new(self.require_user()?.id.clone(), text);
        self.post_mut(post_id)?.add_comment(comment.clone());
        self.persist_posts()?;
        Ok(comment)
    }

    /// Move coins from the tipper's balance onto the post
    pub async fn tip_post(&mut self, post_id: &str, amount: Coins) -> AppResult<Coins> {
        if amount == 0 {
            return Err(DomainError::InvalidAmount.into());
        }
        self.post(post_id)?;
        self.require_user_mut()?.debit(amount)?;

        let post = self.post_mut(post_id)?;
        post.add_tip(amount);
        let total = post.tips;
        info!(post_id, amount, "Post tipped");

        self.persist_posts()?;
        self.sync_profile().await;
        Ok(total)
    }

    /// Owners known to this client, including the signed-in one
    pub fn known_owners(&self) -> AppResult<Vec<OwnerProfile>> {
        let mut owners = self.db.users()?;
        if let Some(me) = self.current_user() {
            match owners.iter_mut().find(|o| o.id == me.id) {
                Some(stored) => *stored = me.clone(),
                None => owners.push(me.clone()),
            }
        }
        Ok(owners)
    }

    pub fn search_feed(&self, term: &str) -> AppResult<Vec<&Post>> {
        let owners = self.known_owners()?;
        Ok(filter_posts(&self.state.posts, &owners, term))
    }

    /// Author of a post, falling back to the first known owner
    pub fn post_author(&self, post: &Post) -> AppResult<Option<OwnerProfile>> {
        let owners = self.known_owners()?;
        Ok(resolve_owner(&owners, &post.owner_id).cloned())
    }

    pub fn is_following(&self, owner_id: &str) -> bool {
        self.state.following.iter().any(|id| id == owner_id)
    }

    /// Follow or unfollow; returns whether the owner is now followed
    pub async fn toggle_follow(&mut self, owner_id: &str) -> AppResult<bool> {
        let user_id = self.require_user()?.id.clone();

        let now_following = if self.is_following(owner_id) {
            self.state.following.retain(|id| id != owner_id);
            false
        } else {
            self.state.following.push(owner_id.to_string());
            true
        };

        self.api
            .save_following(&user_id, &self.state.following)
            .await?;
        debug!(owner_id, now_following, "Follow toggled");
        Ok(now_following)
    }

    pub fn trending_tags(&self) -> Vec<String> {
        trending_tags(&self.state.challenges)
    }
}

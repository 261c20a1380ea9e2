//! Community creation and membership

use domain::entities::Community;
use domain::DomainError;
use tracing::info;

use crate::app::CatCircleApp;
use crate::errors::AppResult;

impl CatCircleApp {
    pub fn communities(&self) -> &[Community] {
        &self.state.communities
    }

    pub fn community(&self, community_id: &str) -> AppResult<&Community> {
        self.state
            .communities
            .iter()
            .find(|c| c.id == community_id)
            .ok_or_else(|| DomainError::CommunityNotFound(community_id.to_string()).into())
    }

    /// Communities the signed-in owner belongs to
    pub fn my_communities(&self) -> AppResult<Vec<&Community>> {
        let user_id = &self.require_user()?.id;
        Ok(self
            .state
            .communities
            .iter()
            .filter(|c| c.is_member(user_id))
            .collect())
    }

    /// The creator becomes the first member
    pub async fn create_community(&mut self, name: &str, description: &str) -> AppResult<Community> {
        if name.trim().is_empty() {
            return Err(DomainError::missing("Community name").into());
        }
        let user_id = self.require_user()?.id.clone();
        let community = Community::create(name, description, &user_id);

        let created = self.api.create_community(&community).await?;
        self.state.communities.push(created.clone());
        info!(community_id = %created.id, name = %created.name, "Community created");
        Ok(created)
    }

    /// Returns false when already a member
    pub fn join_community(&mut self, community_id: &str) -> AppResult<bool> {
        let user_id = self.require_user()?.id.clone();
        let joined = self.community_mut(community_id)?.join(&user_id);
        if joined {
            self.persist_communities()?;
            info!(community_id, "Joined community");
        }
        Ok(joined)
    }

    /// Returns false when not a member
    pub fn leave_community(&mut self, community_id: &str) -> AppResult<bool> {
        let user_id = self.require_user()?.id.clone();
        let left = self.community_mut(community_id)?.leave(&user_id);
        if left {
            self.persist_communities()?;
            info!(community_id, "Left community");
        }
        Ok(left)
    }

    fn community_mut(&mut self, community_id: &str) -> AppResult<&mut Community> {
        self.state
            .communities
            .iter_mut()
            .find(|c| c.id == community_id)
            .ok_or_else(|| DomainError::CommunityNotFound(community_id.to_string()).into())
    }

    fn persist_communities(&self) -> AppResult<()> {
        if self.api.is_remote() {
            return Ok(());
        }
        Ok(self.db.save_communities(&self.state.communities)?)
    }
}

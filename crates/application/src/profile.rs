//! Owner profile and cat management

use domain::constants::{canonical_term, CAT_BREEDS, CAT_PERSONALITIES, HEALTH_TAGS};
use domain::entities::{CatProfile, Gender, OwnerProfile};
use domain::{new_id, DomainError};
use tracing::info;

use crate::app::CatCircleApp;
use crate::errors::AppResult;

/// Partial owner update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub account_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.account_name.is_none()
            && self.bio.is_none()
            && self.avatar.is_none()
            && self.interests.is_none()
    }

    pub fn apply(self, owner: &mut OwnerProfile) -> AppResult<()> {
        if let Some(name) = self.account_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::missing("Account name").into());
            }
            owner.account_name = name.to_string();
        }
        if let Some(bio) = self.bio {
            owner.bio = bio.trim().to_string();
        }
        if let Some(avatar) = self.avatar.filter(|a| !a.trim().is_empty()) {
            owner.avatar = avatar;
        }
        if let Some(interests) = self.interests {
            owner.interests = interests
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
        }
        Ok(())
    }
}

/// Fields for a new cat
#[derive(Debug, Clone, PartialEq)]
pub struct NewCat {
    pub name: String,
    pub breed: String,
    pub age: u32,
    pub gender: Gender,
    pub neutered: bool,
    pub personality: Vec<String>,
    pub health_tags: Vec<String>,
    pub bio: Option<String>,
}

impl NewCat {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            age: 1,
            gender: Gender::Female,
            neutered: false,
            personality: Vec::new(),
            health_tags: Vec::new(),
            bio: None,
        }
    }

    fn into_cat(self, owner_id: &str) -> AppResult<CatProfile> {
        if self.name.trim().is_empty() {
            return Err(DomainError::missing("Cat name").into());
        }
        let id = new_id("cat");
        Ok(CatProfile {
            avatar: format!("https://picsum.photos/seed/{}/200/200", id),
            id,
            owner_id: owner_id.to_string(),
            name: self.name.trim().to_string(),
            breed: canonical_term(CAT_BREEDS, &self.breed),
            age: self.age,
            gender: self.gender,
            neutered: self.neutered,
            personality: canonical_terms(CAT_PERSONALITIES, &self.personality),
            health_tags: canonical_terms(HEALTH_TAGS, &self.health_tags),
            bio: self.bio.filter(|b| !b.trim().is_empty()),
            features: None,
        })
    }
}

fn canonical_terms(vocabulary: &[&'static str], terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in terms.iter().filter(|t| !t.trim().is_empty()) {
        let term = canonical_term(vocabulary, term);
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

impl CatCircleApp {
    pub async fn update_profile(&mut self, patch: ProfilePatch) -> AppResult<&OwnerProfile> {
        patch.apply(self.require_user_mut()?)?;
        self.sync_profile().await;
        info!("Profile updated");
        self.require_user()
    }

    pub async fn add_cat(&mut self, cat: NewCat) -> AppResult<CatProfile> {
        let user = self.require_user_mut()?;
        let cat = cat.into_cat(&user.id)?;
        user.cats.push(cat.clone());
        info!(cat_id = %cat.id, name = %cat.name, "Cat added");

        self.sync_profile().await;
        Ok(cat)
    }

    /// Replace a cat; id and owner stay fixed
    pub async fn update_cat(&mut self, mut cat: CatProfile) -> AppResult<CatProfile> {
        let user = self.require_user_mut()?;
        let owner_id = user.id.clone();
        let slot = user.cat_mut(&cat.id)?;
        cat.owner_id = owner_id;
        *slot = cat.clone();

        self.sync_profile().await;
        Ok(cat)
    }

    pub async fn remove_cat(&mut self, cat_id: &str) -> AppResult<CatProfile> {
        let user = self.require_user_mut()?;
        let index = user
            .cats
            .iter()
            .position(|c| c.id == cat_id)
            .ok_or_else(|| DomainError::CatNotFound(cat_id.to_string()))?;
        let removed = user.cats.remove(index);
        info!(cat_id, "Cat removed");

        self.sync_profile().await;
        Ok(removed)
    }
}

//! Sign-in, sign-up and sign-out against the stored user list

use domain::constants::{canonical_term, CAT_BREEDS, DEFAULT_BREED, SIGNUP_COIN_GRANT};
use domain::entities::{CatProfile, Gender, OwnerProfile};
use domain::{new_id, DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use storage::LocalDb;
use tracing::info;

use crate::errors::AppResult;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub account_name: String,
    pub email: String,
    pub cat_name: String,
    /// Blank falls back to the default breed
    pub cat_breed: String,
}

impl SignUpForm {
    pub fn validate(&self) -> DomainResult<()> {
        if self.account_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.cat_name.trim().is_empty()
        {
            return Err(DomainError::IncompleteSignUp);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    fn breed(&self) -> String {
        if self.cat_breed.trim().is_empty() {
            DEFAULT_BREED.to_string()
        } else {
            canonical_term(CAT_BREEDS, &self.cat_breed)
        }
    }

    /// New account with one cat and the sign-up coin grant
    pub fn into_owner(self) -> OwnerProfile {
        let owner_id = new_id("owner");
        let cat_id = new_id("cat");
        let breed = self.breed();

        let cat = CatProfile {
            id: cat_id.clone(),
            owner_id: owner_id.clone(),
            name: self.cat_name.trim().to_string(),
            breed: breed.clone(),
            age: 1,
            gender: Gender::Female,
            neutered: true,
            personality: vec!["Curious".to_string()],
            health_tags: Vec::new(),
            avatar: format!("https://picsum.photos/seed/{}/200/200", cat_id),
            bio: Some("The start of a grand adventure.".to_string()),
            features: None,
        };

        OwnerProfile {
            avatar: format!("https://i.pravatar.cc/150?u={}", owner_id),
            id: owner_id,
            account_name: self.account_name.trim().to_string(),
            email: Some(self.email.trim().to_string()),
            bio: "New member of the CatCircle family!".to_string(),
            coin_balance: SIGNUP_COIN_GRANT,
            followers_count: 0,
            following_count: 0,
            cats: vec![cat],
            interests: vec![breed],
        }
    }
}

/// Case-insensitive lookup by account name or email
pub fn find_user(users: &[OwnerProfile], identifier: &str) -> DomainResult<OwnerProfile> {
    users
        .iter()
        .find(|u| u.matches_login(identifier))
        .cloned()
        .ok_or_else(|| DomainError::UserNotFound(identifier.to_string()))
}

#[derive(Clone)]
pub struct AuthService {
    db: LocalDb,
}

impl AuthService {
    pub fn new(db: LocalDb) -> Self {
        Self { db }
    }

    pub fn sign_in(&self, identifier: &str) -> AppResult<OwnerProfile> {
        let user = find_user(&self.db.users()?, identifier)?;
        self.db.set_current_user_id(Some(&user.id))?;
        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Validate, reject duplicate emails, store the account and sign in.
    /// Nothing is written when validation fails.
    pub fn sign_up(&self, form: SignUpForm) -> AppResult<OwnerProfile> {
        form.validate()?;

        let users = self.db.users()?;
        if users.iter().any(|u| u.has_email(&form.email)) {
            return Err(DomainError::EmailAlreadyRegistered(form.email).into());
        }

        let user = form.into_owner();
        self.db.save_user(&user)?;
        self.db.set_current_user_id(Some(&user.id))?;
        info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    pub fn sign_out(&self) -> AppResult<()> {
        self.db.set_current_user_id(None)?;
        info!("Signed out");
        Ok(())
    }
}

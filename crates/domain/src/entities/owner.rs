//! OwnerProfile and CatProfile - the account and the cats it manages

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::Coins;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// A cat managed by an owner account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatProfile {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub breed: String,
    pub age: u32,
    pub gender: Gender,
    pub neutered: bool,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub health_tags: Vec<String>,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Optional embedding reserved for smarter matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<f32>>,
}

/// A human account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub id: String,
    pub account_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    pub coin_balance: Coins,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub cats: Vec<CatProfile>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl OwnerProfile {
    /// First cat on the account; drives breed affinity and default post author
    pub fn primary_cat(&self) -> Option<&CatProfile> {
        self.cats.first()
    }

    pub fn cat(&self, cat_id: &str) -> Option<&CatProfile> {
        self.cats.iter().find(|c| c.id == cat_id)
    }

    pub fn cat_mut(&mut self, cat_id: &str) -> DomainResult<&mut CatProfile> {
        self.cats
            .iter_mut()
            .find(|c| c.id == cat_id)
            .ok_or_else(|| DomainError::CatNotFound(cat_id.to_string()))
    }

    /// Cat by id, falling back to the primary cat for dangling references
    pub fn cat_or_primary(&self, cat_id: &str) -> Option<&CatProfile> {
        self.cat(cat_id).or_else(|| self.primary_cat())
    }

    pub fn can_afford(&self, amount: Coins) -> bool {
        self.coin_balance >= amount
    }

    /// Remove coins from the balance; leaves the balance untouched on failure
    pub fn debit(&mut self, amount: Coins) -> DomainResult<()> {
        if !self.can_afford(amount) {
            return Err(DomainError::InsufficientCoins {
                required: amount,
                available: self.coin_balance,
            });
        }
        self.coin_balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: Coins) {
        self.coin_balance = self.coin_balance.saturating_add(amount);
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .map(|e| e.eq_ignore_ascii_case(email.trim()))
            .unwrap_or(false)
    }

    /// Sign-in identifier match: account name or email, case-insensitive
    pub fn matches_login(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.account_name.eq_ignore_ascii_case(identifier) || self.has_email(identifier)
    }

    /// Interests shared with another owner, in this owner's order
    pub fn shared_interests<'a>(&'a self, other: &OwnerProfile) -> Vec<&'a str> {
        self.interests
            .iter()
            .filter(|i| other.interests.contains(i))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_debit_rejects_overdraft_without_mutation() {
        let mut owner = fixtures::owner_me();
        let before = owner.coin_balance;

        let err = owner.debit(before + 1).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientCoins { .. }));
        assert_eq!(owner.coin_balance, before);

        owner.debit(250).unwrap();
        assert_eq!(owner.coin_balance, before - 250);
    }

    #[test]
    fn test_login_matches_name_or_email() {
        let mut owner = fixtures::owner_me();
        owner.email = Some("Sarah@Example.com".to_string());

        assert!(owner.matches_login("ragdoll_official"));
        assert!(owner.matches_login("sarah@example.com"));
        assert!(!owner.matches_login("someone_else"));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let owner = fixtures::owner_me();
        let json = serde_json::to_value(&owner).unwrap();

        assert!(json.get("accountName").is_some());
        assert!(json.get("coinBalance").is_some());
        assert!(json["cats"][0].get("healthTags").is_some());
        assert!(json.get("email").is_none());
    }
}

//! Community - joinable group that posts can be scoped to

use serde::{Deserialize, Serialize};

use crate::ids::new_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub avatar: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub creator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed_tag: Option<String>,
}

impl Community {
    /// New community whose creator is its first member
    pub fn create(name: &str, description: &str, creator_id: &str) -> Self {
        let name = name.trim();
        Self {
            id: new_id("comm"),
            name: name.to_string(),
            description: description.trim().to_string(),
            avatar: format!(
                "https://picsum.photos/seed/{}/200/200",
                name.replace(char::is_whitespace, "")
            ),
            member_ids: vec![creator_id.to_string()],
            creator_id: creator_id.to_string(),
            breed_tag: None,
        }
    }

    pub fn is_member(&self, owner_id: &str) -> bool {
        self.member_ids.iter().any(|m| m == owner_id)
    }

    /// Returns false when already a member
    pub fn join(&mut self, owner_id: &str) -> bool {
        if self.is_member(owner_id) {
            return false;
        }
        self.member_ids.push(owner_id.to_string());
        true
    }

    /// Returns false when not a member
    pub fn leave(&mut self, owner_id: &str) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|m| m != owner_id);
        before != self.member_ids.len()
    }
}

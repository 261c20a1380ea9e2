//! Post and Comment - feed entries

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{new_id, now_millis};
use crate::value_objects::RiskLevel;
use crate::{Coins, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Daily,
    CareTips,
    Problem,
}

impl PostType {
    pub const ALL: [PostType; 3] = [PostType::Daily, PostType::CareTips, PostType::Problem];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Daily => "DAILY",
            PostType::CareTips => "CARE_TIPS",
            PostType::Problem => "PROBLEM",
        }
    }

    /// Tag every post carries for its own type, e.g. `care_tips`
    pub fn as_tag(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "DAILY" => Some(PostType::Daily),
            "CARE_TIPS" | "CARETIPS" | "TIPS" => Some(PostType::CareTips),
            "PROBLEM" => Some(PostType::Problem),
            _ => None,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub owner_id: String,
    pub text: String,
    pub timestamp: Timestamp,
}

impl Comment {
    pub fn new(owner_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: new_id(""),
            owner_id: owner_id.into(),
            text: text.into(),
            timestamp: now_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub cat_id: String,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub tips: Coins,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Fresh post with no engagement yet
    pub fn new(
        owner_id: impl Into<String>,
        cat_id: impl Into<String>,
        post_type: PostType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(""),
            cat_id: cat_id.into(),
            owner_id: owner_id.into(),
            community_id: None,
            post_type,
            content: content.into(),
            media_url: None,
            timestamp: now_millis(),
            likes: 0,
            tips: 0,
            comments: Vec::new(),
            risk_level: None,
            tags: Vec::new(),
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

    pub fn in_community(mut self, community_id: Option<String>) -> Self {
        self.community_id = community_id.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_media(mut self, media_url: Option<String>) -> Self {
        self.media_url = media_url.filter(|m| !m.trim().is_empty());
        self
    }

    pub fn like(&mut self) {
        self.likes += 1;
    }

    pub fn add_tip(&mut self, amount: Coins) {
        self.tips = self.tips.saturating_add(amount);
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_no_engagement(&self) -> bool {
        self.likes == 0 && self.tips == 0 && self.comments.is_empty()
    }
}

/// Clean user-entered tags: strip `#`, trim, drop blanks and duplicates,
/// then append the post type tag.
pub fn normalize_tags<I, S>(tags: I, post_type: PostType) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let clean = tag.as_ref().replace('#', "").trim().to_string();
        if !clean.is_empty() && !out.contains(&clean) {
            out.push(clean);
        }
    }
    let type_tag = post_type.as_tag();
    if !out.contains(&type_tag) {
        out.push(type_tag);
    }
    out
}

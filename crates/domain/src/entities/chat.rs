//! ChatMessage - direct and group chat entries

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::ids::{new_id, now_millis};
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Build a message; at least one of text or image must be present
    pub fn compose(
        sender_id: &str,
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> DomainResult<Self> {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        let image_url = image_url.map(str::trim).filter(|i| !i.is_empty());
        if text.is_none() && image_url.is_none() {
            return Err(DomainError::EmptyMessage);
        }

        Ok(Self {
            id: new_id("msg"),
            sender_id: sender_id.to_string(),
            text: text.map(str::to_string),
            image_url: image_url.map(str::to_string),
            timestamp: now_millis(),
        })
    }

    pub fn text(sender_id: &str, text: &str) -> DomainResult<Self> {
        Self::compose(sender_id, Some(text), None)
    }
}

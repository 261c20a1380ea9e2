//! AssistantMessage - one turn of the AI assistant conversation

use serde::{Deserialize, Serialize};

use crate::ids::{new_id, now_millis};
use crate::value_objects::RiskLevel;
use crate::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantRole {
    User,
    Assistant,
}

/// Structured advice attached to an assistant-authored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceMetadata {
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default)]
    pub actionable_steps: Vec<String>,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_up_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_summary: Option<String>,
    #[serde(default)]
    pub recommended_product_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub id: String,
    pub role: AssistantRole,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AdviceMetadata>,
}

impl AssistantMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_id("am"),
            role: AssistantRole::User,
            content: content.into(),
            timestamp: now_millis(),
            metadata: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: new_id("am"),
            role: AssistantRole::Assistant,
            content: content.into(),
            timestamp: now_millis(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: AdviceMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_from_user(&self) -> bool {
        self.role == AssistantRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_wire_format() {
        let msg = AssistantMessage::assistant("Keep an eye on the litter box").with_metadata(
            AdviceMetadata {
                risk_level: RiskLevel::Medium,
                analysis: None,
                actionable_steps: vec!["Track water intake".to_string()],
                citations: vec!["Urinary Issues".to_string()],
                follow_up_questions: Vec::new(),
                community_summary: Some("Watch the litter box".to_string()),
                recommended_product_ids: vec!["pr1".to_string()],
            },
        );

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["metadata"]["riskLevel"], "Medium");
        assert_eq!(json["metadata"]["recommendedProductIds"][0], "pr1");
        assert!(json["metadata"].get("followUpQuestions").is_none());
    }
}

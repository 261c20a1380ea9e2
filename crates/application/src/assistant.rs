//! Assistant conversation state

use domain::constants::ASSISTANT_SUMMARY_TAGS;
use domain::entities::{AssistantMessage, OwnerProfile, Post, PostType, Product};
use tracing::{debug, warn};

use crate::advice::AdviceService;
use crate::errors::ASSISTANT_FALLBACK_MESSAGE;

pub const ASSISTANT_GREETING: &str = "Hello! I'm your AI Assistant. I have access to professional veterinary knowledge and our entire Cat Mall. How can I help you and your cat today?";

pub const DEFAULT_HISTORY_WINDOW: usize = 6;

#[derive(Debug, Clone)]
pub struct AssistantSession {
    messages: Vec<AssistantMessage>,
    history_window: usize,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl AssistantSession {
    pub fn new(history_window: usize) -> Self {
        Self {
            messages: vec![AssistantMessage::assistant(ASSISTANT_GREETING)],
            history_window,
        }
    }

    pub fn messages(&self) -> &[AssistantMessage] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&AssistantMessage> {
        self.messages.iter().rev().find(|m| !m.is_from_user())
    }

    /// Messages sent with the next request: the trailing window
    fn history(&self) -> &[AssistantMessage] {
        let start = self.messages.len().saturating_sub(self.history_window);
        &self.messages[start..]
    }

    /// Ask the assistant. Blank input is ignored and returns `None`.
    /// Any failure becomes the fallback reply; nothing is retried.
    pub async fn send(
        &mut self,
        advice: &AdviceService,
        input: &str,
        products: &[Product],
    ) -> Option<&AssistantMessage> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        let history = self.history().to_vec();
        self.messages.push(AssistantMessage::user(input));
        debug!(history = history.len(), "Sending assistant query");

        let reply = match advice.get_advice(query, &history, products).await {
            Ok(response) => {
                let content = response.analysis.clone();
                AssistantMessage::assistant(content).with_metadata(response.into_metadata())
            }
            Err(e) => {
                warn!(error = %e, "Assistant advice failed, showing fallback");
                AssistantMessage::assistant(ASSISTANT_FALLBACK_MESSAGE)
            }
        };

        self.messages.push(reply);
        self.messages.last()
    }
}

/// Turn an assistant reply into a CARE_TIPS post for the feed.
/// Replies without advice metadata cannot be shared.
pub fn share_summary(message: &AssistantMessage, author: &OwnerProfile) -> Option<Post> {
    let metadata = message.metadata.as_ref()?;

    let summary = metadata
        .community_summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(&message.content);
    let steps = metadata
        .actionable_steps
        .iter()
        .map(|s| format!("• {}", s))
        .collect::<Vec<_>>()
        .join("\n");
    let content = format!(
        "💡 AI Assistant Summary:\n{}\n\nKey Recommendations:\n{}",
        summary, steps
    );

    let cat_id = author
        .primary_cat()
        .map(|c| c.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    Some(
        Post::new(author.id.clone(), cat_id, PostType::CareTips, content)
            .with_tags(ASSISTANT_SUMMARY_TAGS.iter().copied()),
    )
}

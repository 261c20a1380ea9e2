//! Direct and group chat

use domain::entities::ChatMessage;
use domain::DomainError;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::CatCircleApp;
use crate::errors::AppResult;

impl CatCircleApp {
    /// Send a direct message, then wait for the peer's canned reply.
    /// Returns the sent message followed by the reply.
    pub async fn send_direct_message(
        &mut self,
        peer_id: &str,
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> AppResult<Vec<ChatMessage>> {
        let user_id = self.require_user()?.id.clone();
        let message = ChatMessage::compose(&user_id, text, image_url)?;
        if !self.known_owners()?.iter().any(|o| o.id == peer_id) {
            return Err(DomainError::UserNotFound(peer_id.to_string()).into());
        }

        self.push_direct(&user_id, peer_id, message.clone())?;
        info!(peer_id, "Direct message sent");

        let delay = self.config.chat.auto_reply_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let reply = ChatMessage::text(peer_id, &self.config.chat.auto_reply_text)?;
        self.push_direct(&user_id, peer_id, reply.clone())?;
        debug!(peer_id, "Auto-reply delivered");

        Ok(vec![message, reply])
    }

    fn push_direct(&mut self, user_id: &str, peer_id: &str, message: ChatMessage) -> AppResult<()> {
        self.state
            .direct_messages
            .entry(peer_id.to_string())
            .or_default()
            .push(message);
        Ok(self.db.save_direct_messages(user_id, &self.state.direct_messages)?)
    }

    /// Group messages get no auto-reply
    pub fn send_group_message(
        &mut self,
        community_id: &str,
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> AppResult<ChatMessage> {
        let user_id = self.require_user()?.id.clone();
        self.community(community_id)?;
        let message = ChatMessage::compose(&user_id, text, image_url)?;

        self.state
            .group_messages
            .entry(community_id.to_string())
            .or_default()
            .push(message.clone());
        self.db.save_group_messages(&self.state.group_messages)?;
        info!(community_id, "Group message sent");
        Ok(message)
    }

    pub fn conversation(&self, peer_id: &str) -> &[ChatMessage] {
        self.state
            .direct_messages
            .get(peer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn group_conversation(&self, community_id: &str) -> &[ChatMessage] {
        self.state
            .group_messages
            .get(community_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Peers with at least one message, most recent conversation first
    pub fn chat_list(&self) -> Vec<(&str, &ChatMessage)> {
        let mut chats: Vec<(&str, &ChatMessage)> = self
            .state
            .direct_messages
            .iter()
            .filter_map(|(peer, log)| log.last().map(|last| (peer.as_str(), last)))
            .collect();
        chats.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        chats
    }
}

//! Canned model for tests and offline runs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::errors::{LlmError, LlmResult};
use crate::model::{GenerationRequest, GenerativeModel};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure { status: u16, message: String },
}

/// Replays queued replies in order and records every request it receives.
/// An exhausted queue answers with [`LlmError::EmptyResponse`].
#[derive(Debug, Default)]
pub struct ScriptedModel {
    name: String,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().push_back(Reply::Text(text.into()));
        self
    }

    /// Queue an HTTP-style failure
    pub fn fail(self, status: u16, message: impl Into<String>) -> Self {
        self.replies.lock().push_back(Reply::Failure {
            status,
            message: message.into(),
        });
        self
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().push_back(Reply::Text(text.into()));
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.prompt.clone())
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<String> {
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure { status, message }) => Err(LlmError::from_status(status, message)),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

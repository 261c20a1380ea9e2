use async_trait::async_trait;

use crate::errors::LlmResult;
use crate::schema::ResponseSchema;

/// One text-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// When set the model is asked for `application/json` matching this schema
    pub response_schema: Option<ResponseSchema>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// A text generator. Single attempt per call, no retry.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// Raw text of the first candidate
    async fn generate(&self, request: GenerationRequest) -> LlmResult<String>;
}

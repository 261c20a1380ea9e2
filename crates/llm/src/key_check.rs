//! API key smoke test: list models, pick one that can generate, probe it

use tracing::info;

use crate::errors::{LlmError, LlmResult};
use crate::gemini::GeminiProvider;
use crate::model::{GenerationRequest, GenerativeModel};

pub const PROBE_PROMPT: &str = "Say hello in one short sentence.";

#[derive(Debug, Clone, PartialEq)]
pub struct KeyCheckReport {
    /// Full model resource name, e.g. `models/gemini-3-flash-preview`
    pub model: String,
    pub sample: String,
}

/// Verify that `provider`'s key can list models and run `generateContent`
pub async fn check_api_key(provider: &GeminiProvider) -> LlmResult<KeyCheckReport> {
    let models = provider.list_models().await?;
    let runnable = models
        .into_iter()
        .find(|m| m.supports_generate_content())
        .ok_or(LlmError::NoRunnableModel)?;

    info!(model = %runnable.name, "Probing model");
    let sample = provider
        .for_model(&runnable.name)
        .generate(GenerationRequest::new(PROBE_PROMPT))
        .await?;

    Ok(KeyCheckReport {
        model: runnable.name,
        sample,
    })
}

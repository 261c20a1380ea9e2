use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Gemini API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// Non-success HTTP status, classified by `kind`
    #[error("Gemini API error {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: &'static str,
        message: String,
    },

    #[error("Request to Gemini failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("Model output is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    /// Output parsed but does not satisfy the declared schema
    #[error("Model output violates schema: {0}")]
    SchemaViolation(String),

    #[error("No model found that supports generateContent")]
    NoRunnableModel,
}

impl LlmError {
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        let mentions_quota = message.contains("quota") || message.contains("QUOTA_EXCEEDED");
        let kind = match status {
            408 => "timeout",
            429 if mentions_quota => "quota_exceeded",
            429 => "rate_limit",
            400 if mentions_quota => "quota_exceeded",
            400 => "bad_request",
            401 => "unauthorized",
            403 => "forbidden",
            404 => "not_found",
            503 => "service_unavailable",
            500..=599 => "server_error",
            _ => "unknown",
        };

        LlmError::Api {
            status,
            kind,
            message,
        }
    }

    /// Whether the failure came from the shape of the model output
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            LlmError::EmptyResponse | LlmError::InvalidJson { .. } | LlmError::SchemaViolation(_)
        )
    }
}

pub type LlmResult<T> = Result<T, LlmError>;

//! Strict parsing of schema-declared model output

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{LlmError, LlmResult};
use crate::model::{GenerationRequest, GenerativeModel};
use crate::schema::ResponseSchema;

/// Parse `raw` as JSON, validate it against `schema`, then deserialize.
///
/// A single surrounding markdown code fence is tolerated. Anything else that
/// is not exactly one JSON document satisfying the schema is an error.
pub fn parse_structured<T: DeserializeOwned>(raw: &str, schema: &ResponseSchema) -> LlmResult<T> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body).map_err(|source| LlmError::InvalidJson {
        source,
        raw: raw.to_string(),
    })?;
    schema.validate(&value)?;

    serde_json::from_value(value).map_err(|e| LlmError::SchemaViolation(e.to_string()))
}

/// Attach `schema` to the request, call the model once and parse the reply
pub async fn generate_structured<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    request: GenerationRequest,
    schema: ResponseSchema,
) -> LlmResult<T> {
    let request = request.with_schema(schema.clone());
    let raw = model.generate(request).await?;
    debug!(model = model.model_name(), bytes = raw.len(), "Parsing structured output");

    parse_structured(&raw, &schema).map_err(|e| {
        warn!(model = model.model_name(), error = %e, "Structured output rejected");
        e
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the language tag line, e.g. ```json
    match rest.find('\n') {
        Some(newline) => rest[newline + 1..].trim(),
        None => rest.trim(),
    }
}

//! Gemini text generation with declared JSON output schemas.
//!
//! [`GenerativeModel`] is the seam the application talks to. [`GeminiProvider`]
//! is the HTTP implementation and [`ScriptedModel`] replays canned replies
//! for tests and offline runs.

use std::env;

mod errors;
pub mod gemini;
pub mod key_check;
mod model;
pub mod schema;
pub mod scripted;
pub mod structured;

pub use errors::{LlmError, LlmResult};
pub use gemini::GeminiProvider;
pub use key_check::{check_api_key, KeyCheckReport};
pub use model::{GenerationRequest, GenerativeModel};
pub use schema::{ResponseSchema, SchemaType};
pub use scripted::ScriptedModel;
pub use structured::{generate_structured, parse_structured};

/// Model used for advice (deeper reasoning)
pub const DEFAULT_REASONING_MODEL: &str = "gemini-3-pro-preview";
/// Model used for triage and post drafting
pub const DEFAULT_FAST_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "API_KEY", "VITE_API_KEY"];

/// First non-empty API key from the environment (after loading `.env`).
/// Surrounding quotes are stripped.
pub fn api_key_from_env() -> Option<String> {
    dotenv::dotenv().ok();

    API_KEY_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|raw| clean_key(&raw))
        .find(|key| !key.is_empty())
}

fn clean_key(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_key_strips_quotes() {
        assert_eq!(clean_key("  'abc123' "), "abc123");
        assert_eq!(clean_key("\"abc123\""), "abc123");
        assert_eq!(clean_key("   "), "");
    }
}

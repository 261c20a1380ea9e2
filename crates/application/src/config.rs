//! Runtime configuration: TOML file plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use llm::{GeminiProvider, LlmError, LlmResult};

use crate::recommendation::MatchWeights;

pub const DEFAULT_CONFIG_FILE: &str = "catcircle.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub assistant: AssistantConfig,
    pub matching: MatchWeights,
    pub chat: ChatConfig,
    pub payment: PaymentConfig,
    pub logging: LogSettings,
}

/// Backend routing and simulated latency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// No base URL means every call is served from local storage
    pub base_url: Option<String>,
    pub simulated_latency_ms: u64,
    pub messages_latency_ms: u64,
    pub following_latency_ms: u64,
    pub purchases_latency_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            simulated_latency_ms: 600,
            messages_latency_ms: 400,
            following_latency_ms: 200,
            purchases_latency_ms: 300,
        }
    }
}

impl ApiConfig {
    /// Local mode without any artificial delay
    pub fn instant() -> Self {
        Self {
            base_url: None,
            simulated_latency_ms: 0,
            messages_latency_ms: 0,
            following_latency_ms: 0,
            purchases_latency_ms: 0,
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: Some(PathBuf::from("catcircle.db")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Never written back to disk
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub reasoning_model: String,
    pub fast_model: String,
    /// Messages of history sent with each advice request
    pub history_window: usize,
    /// Override for the Gemini host
    pub base_url: Option<String>,
    /// Per-request HTTP timeout for Gemini calls
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            reasoning_model: llm::DEFAULT_REASONING_MODEL.to_string(),
            fast_model: llm::DEFAULT_FAST_MODEL.to_string(),
            history_window: crate::assistant::DEFAULT_HISTORY_WINDOW,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl AssistantConfig {
    /// Gemini client for `model` with the configured key, host and timeout
    pub fn gemini_provider(&self, model: &str) -> LlmResult<GeminiProvider> {
        let key = self.api_key.clone().ok_or(LlmError::MissingApiKey)?;
        let mut provider = GeminiProvider::new(key, model)?
            .with_timeout(Duration::from_secs(self.timeout_secs))?;
        if let Some(url) = &self.base_url {
            provider = provider.with_base_url(url.clone());
        }
        Ok(provider)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub auto_reply_delay_ms: u64,
    pub auto_reply_text: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auto_reply_delay_ms: 1000,
            auto_reply_text: "Meow! 🐾".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub processing_ms: u64,
    pub settle_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_ms: 2000,
            settle_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Environment variable whose value could not be parsed and was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidOverride {
    pub variable: &'static str,
    pub value: String,
}

impl InvalidOverride {
    pub fn log(&self) {
        warn!(variable = self.variable, value = %self.value, "Ignoring invalid environment override");
    }
}

impl AppConfig {
    /// Read `path` (or `catcircle.toml` when present), then apply the
    /// environment. An explicit path that cannot be read is an error.
    ///
    /// Rejected overrides are returned rather than logged so the caller can
    /// report them once its subscriber is installed.
    pub fn load(path: Option<&Path>) -> Result<(Self, Vec<InvalidOverride>)> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        dotenv::dotenv().ok();
        let rejected = config.apply_env_overrides();
        Ok((config, rejected))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// In-memory storage and no artificial delays
    pub fn for_tests() -> Self {
        Self {
            api: ApiConfig::instant(),
            storage: StorageConfig {
                database_path: None,
            },
            chat: ChatConfig {
                auto_reply_delay_ms: 0,
                ..ChatConfig::default()
            },
            payment: PaymentConfig {
                processing_ms: 0,
                settle_ms: 0,
            },
            ..Self::default()
        }
    }

    pub fn apply_env_overrides(&mut self) -> Vec<InvalidOverride> {
        let mut rejected = Vec::new();
        if let Some(url) = env_value("CATCIRCLE_API_BASE_URL") {
            self.api.base_url = Some(url);
        }
        if let Some(delay) = env_parsed::<u64>("CATCIRCLE_API_DELAY_MS", &mut rejected) {
            self.api.simulated_latency_ms = delay;
        }
        if let Some(path) = env_value("CATCIRCLE_DB_PATH") {
            self.storage.database_path = if path == ":memory:" {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        if let Some(key) = llm::api_key_from_env() {
            self.assistant.api_key = Some(key);
        }
        if let Some(model) = env_value("GEMINI_MODEL") {
            self.assistant.reasoning_model = model;
        }
        if let Some(model) = env_value("GEMINI_FAST_MODEL") {
            self.assistant.fast_model = model;
        }
        if let Some(json) = env_parsed::<bool>("CATCIRCLE_LOG_JSON", &mut rejected) {
            self.logging.json = json;
        }
        rejected
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T: FromStr>(name: &'static str, rejected: &mut Vec<InvalidOverride>) -> Option<T> {
    let raw = env_value(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            rejected.push(InvalidOverride {
                variable: name,
                value: raw,
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.simulated_latency_ms, 600);
        assert!(config.api.base_url.is_none());
        assert_eq!(config.assistant.history_window, 6);
        assert_eq!(config.matching, MatchWeights::default());
        assert_eq!(config.chat.auto_reply_text, "Meow! 🐾");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://api.catcircle.test"

            [matching]
            base = 50
            ceiling = 90

            [assistant]
            history_window = 10
            timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("https://api.catcircle.test"));
        assert_eq!(config.api.simulated_latency_ms, 600);
        assert_eq!(config.matching.base, 50);
        assert_eq!(config.matching.per_shared_interest, 8);
        assert_eq!(config.matching.ceiling, 90);
        assert_eq!(config.assistant.history_window, 10);
        assert_eq!(config.assistant.fast_model, llm::DEFAULT_FAST_MODEL);
        assert_eq!(config.assistant.timeout_secs, 15);
    }

    #[test]
    fn test_gemini_provider_needs_key() {
        let mut assistant = AssistantConfig::default();
        assert!(matches!(
            assistant.gemini_provider(llm::DEFAULT_FAST_MODEL),
            Err(LlmError::MissingApiKey)
        ));

        assistant.api_key = Some("key".into());
        assistant.timeout_secs = 5;
        let provider = assistant.gemini_provider("gemini-test").unwrap();
        assert_eq!(provider.model(), "gemini-test");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.assistant.api_key = Some("secret".into());
        let raw = toml::to_string(&config).unwrap();
        assert!(!raw.contains("secret"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_unparsable_override_is_reported() {
        std::env::set_var("CATCIRCLE_TEST_RETRIES", "many");
        std::env::set_var("CATCIRCLE_TEST_TIMEOUT", " 250 ");

        let mut rejected = Vec::new();
        assert_eq!(env_parsed::<u64>("CATCIRCLE_TEST_RETRIES", &mut rejected), None);
        assert_eq!(env_parsed::<u64>("CATCIRCLE_TEST_TIMEOUT", &mut rejected), Some(250));
        assert_eq!(env_parsed::<u64>("CATCIRCLE_TEST_UNSET", &mut rejected), None);

        assert_eq!(
            rejected,
            vec![InvalidOverride {
                variable: "CATCIRCLE_TEST_RETRIES",
                value: "many".to_string(),
            }]
        );
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catcircle.toml");
        std::fs::write(&path, "[chat]\nauto_reply_delay_ms = 5\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.chat.auto_reply_delay_ms, 5);
    }
}

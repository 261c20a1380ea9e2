use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// What the user is waiting on
#[derive(Debug, Clone, Copy)]
pub enum ProgressType {
    /// Local or remote API call
    Api,
    /// Gemini request
    Ai,
    /// Simulated card checkout
    Payment,
}

struct ProgressConfig {
    spinner_chars: &'static str,
    tick_interval: Duration,
    color: &'static str,
}

impl ProgressType {
    fn config(self) -> ProgressConfig {
        match self {
            ProgressType::Api => ProgressConfig {
                spinner_chars: "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
                tick_interval: Duration::from_millis(80),
                color: "cyan",
            },
            ProgressType::Ai => ProgressConfig {
                spinner_chars: "🐱😺😸😹😻",
                tick_interval: Duration::from_millis(200),
                color: "magenta",
            },
            ProgressType::Payment => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
                tick_interval: Duration::from_millis(120),
                color: "yellow",
            },
        }
    }

    pub fn start(self, message: &str) -> Spinner {
        let config = self.config();
        let bar = ProgressBar::new_spinner();
        let template = format!("{{spinner:.{}}} {{msg}}", config.color);
        let style = ProgressStyle::default_spinner()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(config.spinner_chars);
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(config.tick_interval);
        Spinner { bar }
    }
}

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn success(self, message: &str) {
        self.bar.finish_with_message(format!("✓ {}", message));
    }

    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}

/// Run `future` behind a spinner that is cleared when it completes
pub async fn with_spinner<F, T>(kind: ProgressType, message: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let spinner = kind.start(message);
    let output = future.await;
    spinner.clear();
    output
}

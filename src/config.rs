use std::time::Duration;

use crate::browser::FormBrowser;
use crate::error::Result;

/// Text written into a textarea when the profile has no message.
pub const DEFAULT_MESSAGE_FALLBACK: &str = "This is a test message.";

/// Timings and text used by the filler's cosmetic effects.
#[derive(Debug, Clone)]
pub struct FillerConfig {
    /// How long a filled control stays highlighted (default: 1.5s).
    pub fill_highlight: Duration,
    /// How long a cleared control stays highlighted (default: 1s).
    pub clear_highlight: Duration,
    /// How long a notice is shown before it starts fading (default: 3s).
    pub notice_duration: Duration,
    /// Delay between the fade starting and the notice node being removed.
    pub notice_fade: Duration,
    pub message_fallback: String,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            fill_highlight: Duration::from_millis(1500),
            clear_highlight: Duration::from_millis(1000),
            notice_duration: Duration::from_millis(3000),
            notice_fade: Duration::from_millis(300),
            message_fallback: DEFAULT_MESSAGE_FALLBACK.to_string(),
        }
    }
}

impl FillerConfig {
    pub fn builder() -> FillerConfigBuilder {
        FillerConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct FillerConfigBuilder {
    config: FillerConfig,
}

impl FillerConfigBuilder {
    pub fn fill_highlight(mut self, duration: Duration) -> Self {
        self.config.fill_highlight = duration;
        self
    }

    pub fn clear_highlight(mut self, duration: Duration) -> Self {
        self.config.clear_highlight = duration;
        self
    }

    /// Set how long notices stay up and how long their fade-out takes.
    pub fn notice(mut self, duration: Duration, fade: Duration) -> Self {
        self.config.notice_duration = duration;
        self.config.notice_fade = fade;
        self
    }

    pub fn message_fallback(mut self, message: impl Into<String>) -> Self {
        self.config.message_fallback = message.into();
        self
    }

    pub fn build(self) -> FillerConfig {
        self.config
    }
}

pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Default timeout for `wait_for_selector` and page loads (default: 30s).
    pub default_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 900,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<FormBrowser> {
        FormBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Widget configuration — the embedding contract with the host page.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Configuration handed to the widget by the host application.
///
/// Mirrors the public constructor contract: `{apiKey, apiUrl, listID,
/// container, theme}`.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Static API key sent as the `x-api-key` header.
    pub api_key: SecretString,
    /// Base URL of the booking API (no trailing slash).
    pub api_url: String,
    /// Experience list to load.
    pub list_id: String,
    /// CSS selector of the host container the widget mounts into.
    pub container: String,
    /// Optional theme name, passed through to the host renderer.
    pub theme: Option<String>,
}

impl WidgetConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        list_id: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            api_url: api_url.into(),
            list_id: list_id.into(),
            container: container.into(),
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Validate required fields before mounting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "apiUrl".into(),
                hint: "API URL, API Key and list ID are required".into(),
            });
        }
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "apiKey".into(),
                hint: "API URL, API Key and list ID are required".into(),
            });
        }
        if self.list_id.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "listID".into(),
                hint: "API URL, API Key and list ID are required".into(),
            });
        }
        if self.container.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "container".into(),
                hint: "Container selector is required".into(),
            });
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "apiUrl".into(),
                message: format!("{} is not an http(s) URL", self.api_url),
            });
        }
        Ok(())
    }
}

use crate::error::{Result, StandupError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CHAT_WEBHOOK: &str = "GOOGLE_CHAT_WEBHOOK_URL";
pub const ENV_SHEET_ENDPOINT: &str = "APPS_SCRIPT_WEB_APP_URL";
pub const ENV_PORT: &str = "STANDUP_PORT";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ChatConfig / SheetConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Google Chat incoming-webhook URL. Unset disables the chat sink.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Apps Script web-app URL fronting the stand-up sheet. Unset disables
    /// the log sink.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

// ---------------------------------------------------------------------------
// HttpConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from an optional YAML file, then apply process
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    /// Override file values with environment variables looked up through
    /// `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_CHAT_WEBHOOK) {
            self.chat.webhook_url = Some(url);
        }
        if let Some(url) = get(ENV_SHEET_ENDPOINT) {
            self.sheet.endpoint_url = Some(url);
        }
        if let Some(port) = get(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| StandupError::InvalidConfig(format!("{ENV_PORT}={port}")))?;
        }
        Ok(())
    }

    pub fn chat_enabled(&self) -> bool {
        self.chat.webhook_url.is_some()
    }

    pub fn sheet_enabled(&self) -> bool {
        self.sheet.endpoint_url.is_some()
    }

    /// Check for mistakes that would silently break delivery.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        check_url(
            &mut warnings,
            "chat.webhook_url",
            ENV_CHAT_WEBHOOK,
            "chat",
            self.chat.webhook_url.as_deref(),
        );
        check_url(
            &mut warnings,
            "sheet.endpoint_url",
            ENV_SHEET_ENDPOINT,
            "sheet",
            self.sheet.endpoint_url.as_deref(),
        );

        if self.http.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "http.timeout_secs must be greater than zero".to_string(),
            });
        }

        if !self.chat_enabled() && !self.sheet_enabled() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no sinks configured: every submission will fail".to_string(),
            });
        }

        warnings
    }
}

fn check_url(
    warnings: &mut Vec<ConfigWarning>,
    field: &str,
    env: &str,
    sink: &str,
    value: Option<&str>,
) {
    let Some(value) = value else {
        warnings.push(ConfigWarning {
            level: WarnLevel::Warning,
            message: format!("{field} is not set ({env}): {sink} sink disabled"),
        });
        return;
    };

    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => warnings.push(ConfigWarning {
            level: WarnLevel::Error,
            message: format!("{field} has unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => warnings.push(ConfigWarning {
            level: WarnLevel::Error,
            message: format!("{field} is not a valid URL: {e}"),
        }),
    }
}

/// Reduce a URL to scheme and host. Webhook URLs carry credentials in their
/// path and query, so only this form is ever printed or logged.
pub fn redact_url(value: &str) -> String {
    match reqwest::Url::parse(value) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{host}/…", url.scheme()),
            None => format!("{}:…", url.scheme()),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const CONFIG_PATH_VAR: &str = "TRENDSCOPE_CONFIG";
pub const DEFAULT_USER_AGENT: &str = "MyContentApp/0.1 by u/username";
pub const HUGGINGFACE_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";
pub const TRENDS_BASE_URL: &str = "https://trends.google.com";
pub const REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const REDDIT_API_BASE: &str = "https://oauth.reddit.com";
pub const DEFAULT_IDEA_TIMEOUT_SECS: u64 = 20;

/// Process-wide settings, resolved once at startup and handed to each
/// client's constructor.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub reddit_auth_url: String,
    pub reddit_api_base: String,
    pub huggingface_key: Option<String>,
    pub huggingface_api_url: String,
    pub trends_base_url: String,
    pub default_region: String,
    pub post_limit: usize,
    pub idea_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reddit_client_id: None,
            reddit_client_secret: None,
            reddit_user_agent: DEFAULT_USER_AGENT.to_string(),
            reddit_auth_url: REDDIT_AUTH_URL.to_string(),
            reddit_api_base: REDDIT_API_BASE.to_string(),
            huggingface_key: None,
            huggingface_api_url: HUGGINGFACE_API_URL.to_string(),
            trends_base_url: TRENDS_BASE_URL.to_string(),
            default_region: crate::DEFAULT_REGION.to_string(),
            post_limit: crate::DEFAULT_POST_LIMIT,
            idea_timeout_secs: DEFAULT_IDEA_TIMEOUT_SECS,
        }
    }
}

/// Optional on-disk overrides. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    reddit_client_id: Option<String>,
    reddit_client_secret: Option<String>,
    reddit_user_agent: Option<String>,
    reddit_auth_url: Option<String>,
    reddit_api_base: Option<String>,
    huggingface_key: Option<String>,
    huggingface_api_url: Option<String>,
    trends_base_url: Option<String>,
    default_region: Option<String>,
    post_limit: Option<usize>,
    idea_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Defaults, then the TOML file named by `TRENDSCOPE_CONFIG`, then the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same resolution as [`AppConfig::load`] with an injected env lookup.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(CONFIG_PATH_VAR)) {
            let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::FileNotFound { path: path.clone() },
                std::io::ErrorKind::PermissionDenied => {
                    ConfigError::PermissionDenied { path: path.clone() }
                }
                _ => ConfigError::InvalidValue {
                    field: CONFIG_PATH_VAR.to_string(),
                    value: format!("{path}: {e}"),
                },
            })?;
            config.apply_toml(&raw)?;
            debug!("Loaded configuration file {}", path);
        }

        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_toml(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_toml(&mut self, raw: &str) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;

        if let Some(v) = non_blank(file.reddit_client_id) {
            self.reddit_client_id = Some(v);
        }
        if let Some(v) = non_blank(file.reddit_client_secret) {
            self.reddit_client_secret = Some(v);
        }
        if let Some(v) = non_blank(file.reddit_user_agent) {
            self.reddit_user_agent = v;
        }
        if let Some(v) = non_blank(file.reddit_auth_url) {
            self.reddit_auth_url = v;
        }
        if let Some(v) = non_blank(file.reddit_api_base) {
            self.reddit_api_base = v;
        }
        if let Some(v) = non_blank(file.huggingface_key) {
            self.huggingface_key = Some(v);
        }
        if let Some(v) = non_blank(file.huggingface_api_url) {
            self.huggingface_api_url = v;
        }
        if let Some(v) = non_blank(file.trends_base_url) {
            self.trends_base_url = v;
        }
        if let Some(v) = non_blank(file.default_region) {
            self.default_region = v;
        }
        if let Some(v) = file.post_limit {
            self.post_limit = v;
        }
        if let Some(v) = file.idea_timeout_secs {
            self.idea_timeout_secs = v;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_blank(lookup("REDDIT_CLIENT_ID")) {
            self.reddit_client_id = Some(v);
        }
        if let Some(v) = non_blank(lookup("REDDIT_CLIENT_SECRET")) {
            self.reddit_client_secret = Some(v);
        }
        if let Some(v) = non_blank(lookup("REDDIT_USER_AGENT")) {
            self.reddit_user_agent = v;
        }
        if let Some(v) = non_blank(lookup("HUGGINGFACE_KEY")) {
            self.huggingface_key = Some(v);
        }
        if let Some(v) = non_blank(lookup("TRENDSCOPE_REGION")) {
            self.default_region = v;
        }
        if let Some(raw) = non_blank(lookup("TRENDSCOPE_POST_LIMIT")) {
            self.post_limit = raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: "TRENDSCOPE_POST_LIMIT".to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.post_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "post_limit".to_string(),
                value: "0".to_string(),
            });
        }
        if self.idea_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "idea_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn reddit_credentials(&self) -> Option<(&str, &str)> {
        match (&self.reddit_client_id, &self.reddit_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    pub fn is_huggingface_configured(&self) -> bool {
        self.huggingface_key.is_some()
    }

    pub fn idea_timeout(&self) -> Duration {
        Duration::from_secs(self.idea_timeout_secs)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

use advice_client::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub(crate) const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Variable name used by the web build; still honoured as a fallback.
const LEGACY_API_KEY_ENV: &str = "VITE_GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) gemini: GeminiSection,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeminiSection {
    #[serde(default = "default_model")]
    pub(crate) model: String,
    #[serde(default = "default_base_url")]
    pub(crate) base_url: String,
    #[serde(default = "default_api_key_env")]
    pub(crate) api_key_env: String,
    /// Human-readable per-request limit such as `"30s"` or `"1m 30s"`.
    #[serde(default = "default_timeout")]
    pub(crate) timeout: String,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

impl Config {
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub(crate) fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let gemini = &self.gemini;
        if gemini.model.trim().is_empty() {
            anyhow::bail!("gemini.model cannot be empty");
        }
        if gemini.base_url.trim().is_empty() {
            anyhow::bail!("gemini.base_url cannot be empty");
        }
        if !gemini.base_url.starts_with("http://") && !gemini.base_url.starts_with("https://") {
            anyhow::bail!("gemini.base_url must start with http:// or https://");
        }
        if gemini.api_key_env.trim().is_empty() {
            anyhow::bail!("gemini.api_key_env cannot be empty");
        }
        if self.request_timeout()?.is_zero() {
            anyhow::bail!("gemini.timeout must be greater than zero");
        }
        Ok(())
    }

    pub(crate) fn request_timeout(&self) -> anyhow::Result<Duration> {
        let raw = &self.gemini.timeout;
        humantime::parse_duration(raw.trim())
            .with_context(|| format!("gemini.timeout is not a duration: {raw:?}"))
    }

    /// Looks the key up under the configured variable, then the legacy one.
    pub(crate) fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        [self.gemini.api_key_env.as_str(), LEGACY_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    pub(crate) fn gemini_config(
        &self,
        api_key: Option<String>,
        model_override: Option<String>,
    ) -> anyhow::Result<GeminiConfig> {
        let model = model_override
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| self.gemini.model.clone());
        Ok(GeminiConfig {
            api_key,
            model,
            base_url: self.gemini.base_url.clone(),
            timeout: Some(self.request_timeout()?),
        })
    }
}

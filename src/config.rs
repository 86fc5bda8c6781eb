use std::fmt;

/// Model used when `OUTREACH_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Token budget used when `OUTREACH_MAX_TOKENS` is not set.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_ENRICHLAYER_BASE_URL: &str = "https://enrichlayer.com/api/v2";

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub enrichlayer_api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub anthropic_base_url: String,
    pub enrichlayer_base_url: String,
    /// `AUTO_FEEDBACK`: answer human-review requests with canned feedback.
    pub auto_feedback: bool,
    /// `DEBUG_LLM`: print request/response debug boxes.
    pub debug_llm: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "missing required environment variable: {name}"),
            Self::InvalidVar(name, value) => {
                write!(f, "invalid value for {name}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load from the process environment. Reads `.env` first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any name -> value source. `from_env` delegates here; tests
    /// pass a map instead of mutating the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let anthropic_api_key = get("ANTHROPIC_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;
        let enrichlayer_api_key = get("ENRICHLAYER_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ENRICHLAYER_API_KEY"))?;

        let max_tokens = match get("OUTREACH_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidVar("OUTREACH_MAX_TOKENS", raw))?,
            None => DEFAULT_MAX_TOKENS,
        };

        // Unattended review is the default; set AUTO_FEEDBACK=false to be
        // prompted on stdin instead.
        let auto_feedback = match get("AUTO_FEEDBACK") {
            Some(raw) => truthy(Some(raw)),
            None => true,
        };

        Ok(Self {
            anthropic_api_key,
            enrichlayer_api_key,
            model: get("OUTREACH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            anthropic_base_url: normalize_base_url(
                get("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            ),
            enrichlayer_base_url: normalize_base_url(
                get("ENRICHLAYER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ENRICHLAYER_BASE_URL.to_string()),
            ),
            auto_feedback,
            debug_llm: truthy(get("DEBUG_LLM")),
        })
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Env-flag convention: `true`, `1`, and `yes` (any case) are on.
fn truthy(value: Option<String>) -> bool {
    match value {
        Some(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        None => false,
    }
}

/// Mask an API key for display: first 10 chars, then a fixed tail.
pub fn mask(key: &str) -> String {
    let head: String = key.chars().take(10).collect();
    format!("{head}**********")
}

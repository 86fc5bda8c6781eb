use std::fmt;
use std::time::Duration;

use ureq::{self, Agent};

use crate::config::Config;
use crate::display::preview;
use crate::profile::types::Profile;
use crate::step::StepError;

/// Errors from the enrichment API, kept variant-per-status so callers (and
/// the profile tool's guidance text) can react to each case.
#[derive(Debug, Clone)]
pub enum ProfileError {
    NotFound { url: String },
    RateLimited,
    Auth,
    Api { status: u16, body: String },
    Network(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { url } => write!(f, "profile not found: {url}"),
            Self::RateLimited => write!(f, "enrichment API rate limited"),
            Self::Auth => write!(f, "enrichment API authentication failed"),
            Self::Api { status, body } => write!(f, "enrichment API returned {status}: {body}"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<ProfileError> for StepError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::NotFound { .. } => StepError::invalid(e.to_string()),
            ProfileError::RateLimited | ProfileError::Network(_) => {
                StepError::transient(e.to_string())
            }
            ProfileError::Auth | ProfileError::Api { .. } => StepError::failed(e.to_string()),
        }
    }
}

/// Seam between workflows and the enrichment backend. The real client speaks
/// HTTP; tests script profiles per URL.
pub trait ProfileApi: Send + Sync {
    fn fetch(&self, linkedin_url: &str) -> Result<Profile, ProfileError>;
}

/// HTTP client for the EnrichLayer profile endpoint.
pub struct EnrichLayerClient {
    agent: Agent,
    api_key: String,
    base_url: String,
}

impl EnrichLayerClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.enrichlayer_api_key, &config.enrichlayer_base_url)
    }
}

impl ProfileApi for EnrichLayerClient {
    fn fetch(&self, linkedin_url: &str) -> Result<Profile, ProfileError> {
        let url = format!("{}/profile", self.base_url);
        let auth = format!("Bearer {}", self.api_key);
        let mut response = self
            .agent
            .get(&url)
            .query("profile_url", linkedin_url)
            .header("Authorization", auth.as_str())
            .call()
            .map_err(|e| ProfileError::Network(e.to_string()))?;

        match response.status().as_u16() {
            200 => response
                .body_mut()
                .read_json::<Profile>()
                .map_err(|e| ProfileError::Api {
                    status: 200,
                    body: format!("unreadable profile payload: {e}"),
                }),
            401 | 403 => Err(ProfileError::Auth),
            404 => Err(ProfileError::NotFound {
                url: linkedin_url.to_string(),
            }),
            429 => Err(ProfileError::RateLimited),
            status => {
                let body = response.body_mut().read_to_string().unwrap_or_default();
                Err(ProfileError::Api {
                    status,
                    body: preview(&body, 200),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spawn_one_shot;

    #[test]
    fn fetches_and_parses_profile() {
        let body = r#"{
            "first_name": "Jensen",
            "last_name": "Huang",
            "headline": "Founder and CEO at NVIDIA",
            "experiences": [{"company": "NVIDIA", "title": "Founder and CEO"}]
        }"#;
        let (base, rx, handle) = spawn_one_shot(200, body);

        let client = EnrichLayerClient::new("el-test-key", base);
        let profile = client
            .fetch("https://www.linkedin.com/in/jenhsunhuang/")
            .unwrap();
        handle.join().unwrap();

        assert_eq!(profile.first_name.as_deref(), Some("Jensen"));
        assert_eq!(profile.current_company(), Some("NVIDIA"));

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("GET /profile?profile_url="));
        // The target URL must ride in the query string percent-encoded.
        assert!(raw.contains("profile_url=https%3A%2F%2Fwww.linkedin.com"));
        assert!(raw.contains("Authorization: Bearer el-test-key"));
    }

    #[test]
    fn missing_profile_maps_to_not_found() {
        let (base, _rx, handle) = spawn_one_shot(404, r#"{"error": "not found"}"#);

        let client = EnrichLayerClient::new("el-test-key", base);
        let err = client
            .fetch("https://linkedin.com/in/jenhsun-huang")
            .err()
            .unwrap();
        handle.join().unwrap();

        match err {
            ProfileError::NotFound { url } => {
                assert_eq!(url, "https://linkedin.com/in/jenhsun-huang");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn rate_limit_and_auth_map_to_variants() {
        let (base, _rx, handle) = spawn_one_shot(429, "{}");
        let client = EnrichLayerClient::new("el-test-key", base);
        let err = client.fetch("https://linkedin.com/in/x").err().unwrap();
        handle.join().unwrap();
        assert!(matches!(err, ProfileError::RateLimited));

        let (base, _rx, handle) = spawn_one_shot(401, "{}");
        let client = EnrichLayerClient::new("bad-key", base);
        let err = client.fetch("https://linkedin.com/in/x").err().unwrap();
        handle.join().unwrap();
        assert!(matches!(err, ProfileError::Auth));
    }

    #[test]
    fn unexpected_status_carries_body() {
        let (base, _rx, handle) = spawn_one_shot(500, "backend exploded");
        let client = EnrichLayerClient::new("el-test-key", base);
        let err = client.fetch("https://linkedin.com/in/x").err().unwrap();
        handle.join().unwrap();

        match err {
            ProfileError::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("backend exploded"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_host_is_network_error() {
        let client = EnrichLayerClient::new("el-test-key", "http://localhost:1");
        let err = client.fetch("https://linkedin.com/in/x").err().unwrap();
        assert!(matches!(err, ProfileError::Network(_)));
    }

    #[test]
    fn step_error_conversion_keeps_retryability() {
        let invalid: StepError = ProfileError::NotFound {
            url: "u".into(),
        }
        .into();
        assert!(matches!(invalid, StepError::Invalid(_)));

        let transient: StepError = ProfileError::RateLimited.into();
        assert!(matches!(transient, StepError::Transient(_)));

        let failed: StepError = ProfileError::Auth.into();
        assert!(matches!(failed, StepError::Failed(_)));
    }
}

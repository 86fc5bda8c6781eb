//! Tools the model can call from a [`crate::llm::Conversation`].

use std::sync::Arc;

use serde_json::json;

use crate::llm::ToolSpec;
use crate::profile::{ProfileApi, ProfileError, QualityReport};

/// What a tool hands back to the model. Errors are data here: they go up as
/// `is_error` tool results so the model can react, not as Rust errors.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// An LLM-callable tool: a name and schema the model sees, plus the handler.
pub trait Tool: Send {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    fn call(&mut self, input: &serde_json::Value) -> ToolOutcome;

    /// The wire form offered to the model.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().into(),
            description: self.description().into(),
            input_schema: self.input_schema(),
        }
    }
}

/// `fetch_linkedin_profile`: look a person up through the enrichment API.
pub struct ProfileTool {
    api: Arc<dyn ProfileApi>,
}

impl ProfileTool {
    pub fn new(api: Arc<dyn ProfileApi>) -> Self {
        Self { api }
    }
}

impl Tool for ProfileTool {
    fn name(&self) -> &'static str {
        "fetch_linkedin_profile"
    }

    fn description(&self) -> &'static str {
        "Fetch a person's LinkedIn profile via the enrichment API.\n\
         \n\
         USE WHEN: you have a LinkedIn profile URL and need the person's name, \
         role, company, or background.\n\
         RETURNS ON SUCCESS: JSON with name, headline, occupation, current company \
         and title, location, experience count, and a profile_quality report.\n\
         RETURNS ON ERROR: an error message with suggestions for correcting the URL.\n\
         INPUT FORMAT: a full profile URL such as https://www.linkedin.com/in/username/\n\
         NOTE: vary the URL between attempts instead of repeating one that just failed."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "linkedin_url": {
                    "type": "string",
                    "description": "Full LinkedIn profile URL, e.g. https://www.linkedin.com/in/username/"
                }
            },
            "required": ["linkedin_url"]
        })
    }

    fn call(&mut self, input: &serde_json::Value) -> ToolOutcome {
        let Some(url) = input.get("linkedin_url").and_then(|v| v.as_str()) else {
            return ToolOutcome::error("the linkedin_url field is required");
        };

        match self.api.fetch(url) {
            Ok(profile) => {
                let quality = QualityReport::analyze(&profile);
                let summary = json!({
                    "name": profile.display_name(),
                    "headline": profile.headline,
                    "occupation": profile.occupation,
                    "current_company": profile.current_company(),
                    "current_title": profile.current_title(),
                    "location": profile.location(),
                    "experience_count": profile.experiences.len(),
                    "profile_quality": quality,
                });
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => ToolOutcome::ok(text),
                    Err(e) => ToolOutcome::error(format!("could not render profile summary: {e}")),
                }
            }
            Err(e) => ToolOutcome::error(fetch_guidance(&e)),
        }
    }
}

/// Status-specific guidance so the model knows whether and how to retry.
fn fetch_guidance(error: &ProfileError) -> String {
    match error {
        ProfileError::NotFound { url } => format!(
            "Profile not found: {url}. Suggestions: remove or add hyphens in the \
             username, try common variations of the person's name, make sure the URL \
             starts with https://www.linkedin.com/in/, and drop anything after the \
             username."
        ),
        ProfileError::RateLimited => {
            "The enrichment API is rate limited right now. Wait before retrying; \
             do not repeat the request immediately."
                .to_string()
        }
        ProfileError::Auth => {
            "Enrichment API authentication failed. The ENRICHLAYER_API_KEY is \
             missing or wrong; retrying with a different URL will not help."
                .to_string()
        }
        ProfileError::Api { status, body } => {
            format!("Enrichment API returned {status}: {body}")
        }
        ProfileError::Network(msg) => {
            format!("Network problem while fetching the profile: {msg}. This may be temporary.")
        }
    }
}

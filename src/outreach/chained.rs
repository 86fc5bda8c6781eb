//! Chained workflow: fetch, extract, compose, in that order. Transient
//! enrichment failures retry in place; everything else kills the run, so a
//! typo in the URL is fatal here where the agent corrects it.

use crate::ctx::Ctx;
use crate::llm::SessionMetrics;
use crate::outreach::OutreachReport;
use crate::pipeline::{Pipeline, PipelineError};
use crate::profile::{Profile, ProfileError};
use crate::prompts;
use crate::runner::Runner;
use crate::step::{Outcome, RetryHint, Step, StepError, StepResult};

/// State threaded through the chained pipeline.
#[derive(Debug, Clone, Default)]
pub struct OutreachState {
    pub url: String,
    pub profile: Option<Profile>,
    pub fields: Option<ProspectFields>,
    pub message: Option<String>,
}

impl OutreachState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// What the message prompt needs from a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProspectFields {
    pub first_name: String,
    pub company: String,
    pub description: String,
    pub is_tech: bool,
}

impl ProspectFields {
    /// Hardcoded extraction, deliberately strict: a profile without a first
    /// name or a current company fails the whole workflow.
    pub fn extract(profile: &Profile) -> Result<Self, StepError> {
        let first_name = profile
            .first_name
            .clone()
            .ok_or_else(|| StepError::invalid("profile missing first_name"))?;
        let experience = profile
            .current_experience()
            .ok_or_else(|| StepError::invalid("profile missing experiences"))?;
        let company = experience
            .company
            .clone()
            .ok_or_else(|| StepError::invalid("profile missing experience company"))?;
        let description = experience.description.clone().unwrap_or_default();

        let industry = profile.industry.as_deref().unwrap_or("").to_lowercase();
        let headline = profile.headline.as_deref().unwrap_or("").to_lowercase();
        let company_lower = company.to_lowercase();
        let is_tech = industry.contains("tech")
            || industry.contains("software")
            || industry.contains("computer")
            || headline.contains("tech")
            || headline.contains("software")
            || headline.contains("ai")
            || company_lower.contains("nvidia")
            || company_lower.contains("microsoft")
            || company_lower.contains("google");

        Ok(Self {
            first_name,
            company,
            description,
            is_tech,
        })
    }
}

pub struct FetchProfile;

impl Step<OutreachState> for FetchProfile {
    fn name(&self) -> &'static str {
        "fetch_profile"
    }

    fn run(&mut self, mut state: OutreachState, ctx: &mut Ctx) -> StepResult<OutreachState> {
        ctx.log(format!("[fetch_profile] {}", state.url));
        let api = ctx
            .profiles()
            .ok_or_else(|| StepError::failed("no profile client configured"))?;
        match api.fetch(&state.url) {
            Ok(profile) => {
                ctx.log(format!("[fetch_profile] found {}", profile.display_name()));
                state.profile = Some(profile);
                Ok((state, Outcome::Continue))
            }
            // Infrastructure flakes get another attempt, counted against the
            // runner's max_retries. Bad URLs do not: the chain has no way to
            // correct one.
            Err(e @ (ProfileError::RateLimited | ProfileError::Network(_))) => {
                ctx.log(format!("[fetch_profile] retrying: {e}"));
                Ok((state, Outcome::Retry(RetryHint::new(e.to_string()))))
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub struct ExtractFields;

impl Step<OutreachState> for ExtractFields {
    fn name(&self) -> &'static str {
        "extract_fields"
    }

    fn run(&mut self, mut state: OutreachState, ctx: &mut Ctx) -> StepResult<OutreachState> {
        let profile = state
            .profile
            .as_ref()
            .ok_or_else(|| StepError::other("extract_fields ran before fetch_profile"))?;
        let fields = ProspectFields::extract(profile)?;
        ctx.log(format!(
            "[extract_fields] name: {}, company: {}, tech: {}",
            fields.first_name, fields.company, fields.is_tech
        ));
        state.fields = Some(fields);
        Ok((state, Outcome::Continue))
    }
}

pub struct ComposeMessage;

impl Step<OutreachState> for ComposeMessage {
    fn name(&self) -> &'static str {
        "compose_message"
    }

    fn run(&mut self, mut state: OutreachState, ctx: &mut Ctx) -> StepResult<OutreachState> {
        let fields = state
            .fields
            .as_ref()
            .ok_or_else(|| StepError::other("compose_message ran before extract_fields"))?;
        let prompt = prompts::outreach_message_prompt(fields);
        let message = ctx
            .llm()
            .user(prompt)
            .max_tokens(300)
            .temperature(0.7)
            .send()?;
        ctx.log(format!("[compose_message] {} chars", message.len()));
        state.message = Some(message);
        Ok((state, Outcome::Done))
    }
}

/// The three-step pipeline: fetch_profile -> extract_fields -> compose_message.
pub fn build_chained_pipeline() -> Result<Pipeline<OutreachState>, PipelineError> {
    Pipeline::builder("chained-outreach")
        .register(FetchProfile)
        .register(ExtractFields)
        .register(ComposeMessage)
        .start_at("fetch_profile")
        .then("extract_fields")
        .then("compose_message")
        .build()
}

/// Run the chained workflow for one URL. Never panics: step errors come back
/// as a failed report. Token usage is not tracked on this path, so the
/// report's metrics stay zero.
pub fn chained_outreach(ctx: &mut Ctx, url: &str) -> OutreachReport {
    let pipeline = match build_chained_pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) => return OutreachReport::failure(url, e.to_string(), SessionMetrics::default()),
    };

    let mut runner = Runner::new(pipeline);
    match runner.run(OutreachState::new(url), ctx) {
        Ok(state) => match state.message {
            Some(message) => OutreachReport::success(url, message, SessionMetrics::default()),
            None => OutreachReport::failure(
                url,
                "pipeline finished without a message",
                SessionMetrics::default(),
            ),
        },
        Err(e) => OutreachReport::failure(url, e.to_string(), SessionMetrics::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileError;
    use crate::testutil::{ScriptedChat, ScriptedProfiles, sample_profile, text_turn};
    use std::sync::Arc;

    const URL: &str = "https://www.linkedin.com/in/jenhsunhuang/";

    fn ctx_with(profiles: ScriptedProfiles, chat: ScriptedChat) -> Ctx {
        Ctx::new()
            .with_profiles(Arc::new(profiles))
            .with_chat(Arc::new(chat))
    }

    #[test]
    fn extract_pulls_fields_and_flags_tech() {
        let fields = ProspectFields::extract(&sample_profile()).unwrap();
        assert_eq!(fields.first_name, "Jensen");
        assert_eq!(fields.company, "NVIDIA");
        assert!(fields.is_tech);
    }

    #[test]
    fn extract_flags_non_tech_prospect() {
        let mut profile = sample_profile();
        profile.first_name = Some("Maria".into());
        profile.headline = Some("VP Operations".into());
        profile.industry = Some("Logistics".into());
        profile.experiences[0].company = Some("Acme Logistics".into());

        let fields = ProspectFields::extract(&profile).unwrap();
        assert!(!fields.is_tech);
    }

    #[test]
    fn extract_fails_without_first_name() {
        let mut profile = sample_profile();
        profile.first_name = None;

        let err = ProspectFields::extract(&profile).err().unwrap();
        assert!(matches!(err, StepError::Invalid(_)));
        assert!(err.to_string().contains("first_name"));
    }

    #[test]
    fn extract_fails_without_experiences() {
        let mut profile = sample_profile();
        profile.experiences.clear();

        let err = ProspectFields::extract(&profile).err().unwrap();
        assert!(err.to_string().contains("experiences"));
    }

    #[test]
    fn happy_path_produces_message() {
        let profiles = ScriptedProfiles::new().with_profile(URL, sample_profile());
        let chat = ScriptedChat::new(vec![text_turn("Hi Jensen, quick rhyme for you.", 200, 60)]);
        let mut ctx = ctx_with(profiles, chat);

        let report = chained_outreach(&mut ctx, URL);

        assert!(report.success);
        assert_eq!(report.message.as_deref(), Some("Hi Jensen, quick rhyme for you."));
        assert!(report.error.is_none());
        // All three steps logged.
        let logs = ctx.logs().join("\n");
        assert!(logs.contains("[fetch_profile]"));
        assert!(logs.contains("[extract_fields] name: Jensen"));
        assert!(logs.contains("[compose_message]"));
    }

    #[test]
    fn compose_sends_the_template_prompt() {
        let profiles = ScriptedProfiles::new().with_profile(URL, sample_profile());
        let chat = ScriptedChat::new(vec![text_turn("msg", 1, 1)]);
        let chat = Arc::new(chat);
        let mut ctx = Ctx::new()
            .with_profiles(Arc::new(profiles))
            .with_chat(Arc::clone(&chat) as Arc<dyn crate::llm::ChatApi>);

        chained_outreach(&mut ctx, URL);

        let calls = chat.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, 300);
        assert_eq!(calls[0].temperature, Some(0.7));
        let prompt = match &calls[0].messages[0].content[0] {
            crate::llm::ContentBlock::Text { text } => text.clone(),
            other => panic!("expected text prompt, got {other:?}"),
        };
        assert!(prompt.contains("Contact name: Jensen"));
        assert!(prompt.contains("rap/verse format"));
    }

    #[test]
    fn broken_url_fails_the_run() {
        // Nothing scripted for this URL, so the fetch comes back not-found.
        let profiles = ScriptedProfiles::new();
        let chat = ScriptedChat::new(vec![]);
        let mut ctx = ctx_with(profiles, chat);

        let report = chained_outreach(&mut ctx, "linkedin.com/in/jenhsun-huang");

        assert!(!report.success);
        assert!(report.message.is_none());
        assert!(report.error.as_deref().unwrap_or("").contains("profile not found"));
    }

    #[test]
    fn sparse_profile_fails_extraction() {
        let mut profile = sample_profile();
        profile.first_name = None;
        let profiles = ScriptedProfiles::new().with_profile(URL, profile);
        let chat = ScriptedChat::new(vec![]);
        let mut ctx = ctx_with(profiles, chat);

        let report = chained_outreach(&mut ctx, URL);

        assert!(!report.success);
        assert!(report.error.as_deref().unwrap_or("").contains("first_name"));
    }

    #[test]
    fn rate_limited_fetch_retries_then_fails() {
        let profiles =
            Arc::new(ScriptedProfiles::new().with_error(URL, ProfileError::RateLimited));
        let mut ctx = Ctx::new()
            .with_profiles(profiles.clone())
            .with_chat(Arc::new(ScriptedChat::new(vec![])));

        let report = chained_outreach(&mut ctx, URL);

        // First attempt plus the runner's three retries.
        assert_eq!(profiles.calls.lock().unwrap().len(), 4);
        assert!(!report.success);
        let error = report.error.as_deref().unwrap_or("");
        assert!(error.contains("exceeded max retries"));
        assert!(error.contains("rate limited"));
    }

    #[test]
    fn missing_profile_client_is_a_clean_failure() {
        let mut ctx = Ctx::new();
        let report = chained_outreach(&mut ctx, URL);

        assert!(!report.success);
        assert!(report.error.as_deref().unwrap_or("").contains("no profile client"));
    }
}

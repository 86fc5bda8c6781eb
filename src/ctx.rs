use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatApi, ChatRequest, LlmClient};
use crate::profile::{EnrichLayerClient, ProfileApi};

/// Execution context for steps: shared clients, model settings, and a log
/// buffer.
///
/// A bare `Ctx::new()` carries no clients; steps that need one fail with a
/// clear error instead of panicking. Wire real clients with
/// [`from_config`](Ctx::from_config), or fakes with the `with_*` builders.
pub struct Ctx {
    log: Vec<String>,
    chat: Option<Arc<dyn ChatApi>>,
    profiles: Option<Arc<dyn ProfileApi>>,
    model: String,
    max_tokens: u32,
}

impl Ctx {
    pub fn new() -> Self {
        Self {
            log: vec![],
            chat: None,
            profiles: None,
            model: crate::config::DEFAULT_MODEL.to_string(),
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
        }
    }

    /// Real HTTP clients for both APIs, settings taken from the config.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_chat(Arc::new(LlmClient::from_config(config)))
            .with_profiles(Arc::new(EnrichLayerClient::from_config(config)))
            .with_model(&config.model, config.max_tokens)
    }

    pub fn with_chat(mut self, chat: Arc<dyn ChatApi>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileApi>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>, max_tokens: u32) -> Self {
        self.model = model.into();
        self.max_tokens = max_tokens;
        self
    }

    /// Start a one-shot LLM request with the context's model settings.
    pub fn llm(&self) -> ChatRequest<'_> {
        ChatRequest::new(self.chat.as_deref(), &self.model, self.max_tokens)
    }

    pub fn profiles(&self) -> Option<&dyn ProfileApi> {
        self.profiles.as_deref()
    }

    /// Shared handle to the chat client, for building a [`Conversation`].
    ///
    /// [`Conversation`]: crate::llm::Conversation
    pub fn chat_handle(&self) -> Option<Arc<dyn ChatApi>> {
        self.chat.clone()
    }

    pub fn profile_handle(&self) -> Option<Arc<dyn ProfileApi>> {
        self.profiles.clone()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push(msg.into());
    }

    pub fn logs(&self) -> &[String] {
        &self.log
    }

    pub fn clear_logs(&mut self) {
        self.log.clear();
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepError;
    use crate::testutil::{ScriptedChat, text_turn};

    #[test]
    fn log_buffer_round_trips() {
        let mut ctx = Ctx::new();
        ctx.log("fetched profile");
        ctx.log("extracted fields");

        assert_eq!(ctx.logs().len(), 2);
        assert_eq!(ctx.logs()[0], "fetched profile");

        ctx.clear_logs();
        assert!(ctx.logs().is_empty());
    }

    #[test]
    fn bare_ctx_has_no_clients() {
        let ctx = Ctx::new();
        assert!(ctx.profiles().is_none());
        let err = ctx.llm().user("Hi").send().err().unwrap();
        assert!(matches!(err, StepError::Failed(_)));
    }

    #[test]
    fn llm_uses_attached_chat_and_model() {
        let chat = Arc::new(ScriptedChat::new(vec![text_turn("pong", 1, 1)]));
        let ctx = Ctx::new()
            .with_chat(chat.clone())
            .with_model("test-model", 64);

        let reply = ctx.llm().user("ping").send().unwrap();

        assert_eq!(reply, "pong");
        let calls = chat.calls.lock().unwrap();
        assert_eq!(calls[0].model, "test-model");
        assert_eq!(calls[0].max_tokens, 64);
    }
}

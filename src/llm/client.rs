use std::time::Duration;

use ureq::{self, Agent};

use crate::config::Config;
use crate::llm::wire::{
    ANTHROPIC_VERSION, ErrorEnvelope, Message, MessagesRequest, MessagesResponse, ToolSpec,
};
use crate::step::StepError;

/// One fully-specified call to the messages API. [`ChatApi`] implementors
/// only see this owned form, which keeps fakes trivial.
#[derive(Debug, Clone)]
pub struct ChatCall {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSpec>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Seam between conversation logic and the wire. The real client speaks HTTP;
/// tests script responses.
pub trait ChatApi: Send + Sync {
    fn send(&self, call: &ChatCall) -> Result<MessagesResponse, StepError>;
}

/// HTTP client for the messages API.
pub struct LlmClient {
    agent: Agent,
    api_key: String,
    base_url: String,
}

impl LlmClient {
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
        Self::new(&config.anthropic_api_key, &config.anthropic_base_url)
    }
}

impl ChatApi for LlmClient {
    fn send(&self, call: &ChatCall) -> Result<MessagesResponse, StepError> {
        let request = MessagesRequest {
            model: &call.model,
            max_tokens: call.max_tokens,
            system: call.system.as_deref(),
            temperature: call.temperature,
            tools: if call.tools.is_empty() {
                None
            } else {
                Some(call.tools.as_slice())
            },
            messages: &call.messages,
        };

        let url = format!("{}/messages", self.base_url);
        let mut response = self
            .agent
            .post(&url)
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send_json(&request)?;

        let status = response.status();
        if status.is_success() {
            Ok(response.body_mut().read_json::<MessagesResponse>()?)
        } else {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            Err(status_error(status.as_u16(), &body))
        }
    }
}

fn status_error(status: u16, body: &str) -> StepError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
        Err(_) => crate::display::preview(body, 200),
    };
    match status {
        401 | 403 => StepError::failed(format!("messages API authentication failed ({detail})")),
        429 => StepError::transient(format!("messages API rate limited ({detail})")),
        500..=599 => StepError::transient(format!("messages API returned {status} ({detail})")),
        _ => StepError::failed(format!("messages API returned {status} ({detail})")),
    }
}

/// Builder for a one-shot call, handed out by [`crate::Ctx::llm`].
pub struct ChatRequest<'a> {
    chat: Option<&'a dyn ChatApi>,
    model: &'a str,
    max_tokens: u32,
    user: Option<String>,
    temperature: Option<f32>,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(chat: Option<&'a dyn ChatApi>, model: &'a str, max_tokens: u32) -> Self {
        Self {
            chat,
            model,
            max_tokens,
            user: None,
            temperature: None,
        }
    }

    pub fn user(mut self, prompt: impl Into<String>) -> Self {
        self.user = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Send the request and return the reply text.
    pub fn send(self) -> Result<String, StepError> {
        let chat = self
            .chat
            .ok_or_else(|| StepError::failed("no chat client configured"))?;
        let user = self
            .user
            .ok_or_else(|| StepError::invalid("llm request needs a user prompt"))?;

        let call = ChatCall {
            model: self.model.to_string(),
            system: None,
            messages: vec![Message::user_text(user)],
            tools: Vec::new(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let response = chat.send(&call)?;
        Ok(response.text())
    }
}

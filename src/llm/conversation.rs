//! The agentic loop: a conversation where the model can call tools, read
//! their results, and keep going until it has a final answer.

use std::sync::Arc;

use serde::Serialize;

use crate::display::preview;
use crate::llm::client::{ChatApi, ChatCall};
use crate::llm::wire::{ContentBlock, Message, Role, Usage};
use crate::step::StepError;
use crate::tools::{Tool, ToolOutcome};

const INPUT_COST_PER_1K: f64 = 0.003;
const OUTPUT_COST_PER_1K: f64 = 0.015;

/// Rough cost estimate from token counts, using public per-1k pricing.
pub fn estimate_cost_usd(input_tokens: u64, output_tokens: u64) -> f64 {
    input_tokens as f64 / 1000.0 * INPUT_COST_PER_1K
        + output_tokens as f64 / 1000.0 * OUTPUT_COST_PER_1K
}

/// One API round-trip, as recorded in [`SessionMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct ApiCall {
    pub turn: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub stop_reason: String,
}

/// What the conversation cost so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionMetrics {
    pub turns: usize,
    pub tool_calls: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub api_calls: Vec<ApiCall>,
}

impl SessionMetrics {
    pub fn estimated_cost_usd(&self) -> f64 {
        estimate_cost_usd(self.input_tokens, self.output_tokens)
    }

    fn record(&mut self, usage: Usage, stop_reason: &str) {
        self.input_tokens += usage.input_tokens;
        self.output_tokens += usage.output_tokens;
        self.api_calls.push(ApiCall {
            turn: self.turns,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            stop_reason: stop_reason.to_string(),
        });
    }
}

/// Fired on the `on_event` hook as the loop progresses.
pub enum TurnEvent<'a> {
    AssistantText {
        text: &'a str,
    },
    ToolRequested {
        name: &'a str,
        input: &'a serde_json::Value,
    },
    ToolCompleted {
        name: &'a str,
        preview: String,
        is_error: bool,
    },
    TurnFinished {
        turn: usize,
        usage: Usage,
        stop_reason: &'a str,
    },
}

/// A persistent multi-turn session. History survives across [`send`] calls,
/// so follow-up prompts see earlier turns and tool results.
///
/// [`send`]: Conversation::send
pub struct Conversation {
    chat: Arc<dyn ChatApi>,
    model: String,
    system: Option<String>,
    tools: Vec<Box<dyn Tool>>,
    messages: Vec<Message>,
    max_turns: usize,
    max_tokens: u32,
    metrics: SessionMetrics,
    on_event: Option<Box<dyn FnMut(&TurnEvent)>>,
}

impl Conversation {
    pub fn new(chat: Arc<dyn ChatApi>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
            system: None,
            tools: Vec::new(),
            messages: Vec::new(),
            max_turns: 10,
            max_tokens: 1024,
            metrics: SessionMetrics::default(),
            on_event: None,
        }
    }

    pub fn with_system(mut self, prompt: impl Into<String>) -> Self {
        self.system = Some(prompt.into());
        self
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Cap API round-trips per [`send`](Conversation::send) call.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Register a callback that fires as the loop progresses: assistant text,
    /// tool requests and results, and per-turn usage.
    pub fn on_event(mut self, cb: impl FnMut(&TurnEvent) + 'static) -> Self {
        self.on_event = Some(Box::new(cb));
        self
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// Send one user prompt and drive the loop to a final text answer.
    ///
    /// Each round-trip: call the API with the tool specs, surface assistant
    /// text, then either return (no tool requests) or execute every requested
    /// tool and feed the results back as `tool_result` blocks. Tool failures
    /// go back to the model flagged `is_error` so it can adjust and retry;
    /// they never abort the loop.
    pub fn send(&mut self, prompt: &str) -> Result<String, StepError> {
        self.messages.push(Message::user_text(prompt));

        let mut turns_this_send = 0;
        loop {
            if turns_this_send >= self.max_turns {
                return Err(StepError::failed(format!(
                    "conversation exceeded {} turns without a final answer",
                    self.max_turns
                )));
            }
            turns_this_send += 1;
            self.metrics.turns += 1;

            let call = ChatCall {
                model: self.model.clone(),
                system: self.system.clone(),
                messages: self.messages.clone(),
                tools: self.tools.iter().map(|t| t.spec()).collect(),
                max_tokens: self.max_tokens,
                temperature: None,
            };
            let response = self.chat.send(&call)?;

            let text = response.text();
            if !text.is_empty() {
                if let Some(cb) = self.on_event.as_mut() {
                    cb(&TurnEvent::AssistantText { text: &text });
                }
            }

            let stop_reason = response.stop_reason.clone().unwrap_or_default();
            self.metrics.record(response.usage, &stop_reason);
            if let Some(cb) = self.on_event.as_mut() {
                cb(&TurnEvent::TurnFinished {
                    turn: self.metrics.turns,
                    usage: response.usage,
                    stop_reason: &stop_reason,
                });
            }

            let requests: Vec<(String, String, serde_json::Value)> = response
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, name, input } => {
                        Some((id.clone(), name.clone(), input.clone()))
                    }
                    _ => None,
                })
                .collect();

            self.messages.push(Message {
                role: Role::Assistant,
                content: response.content,
            });

            if stop_reason != "tool_use" || requests.is_empty() {
                return Ok(text);
            }

            let mut results = Vec::with_capacity(requests.len());
            for (id, name, input) in &requests {
                if let Some(cb) = self.on_event.as_mut() {
                    cb(&TurnEvent::ToolRequested {
                        name: name.as_str(),
                        input,
                    });
                }

                let outcome = match self.tools.iter_mut().find(|t| t.name() == name) {
                    Some(tool) => tool.call(input),
                    None => ToolOutcome::error(format!("unknown tool: {name}")),
                };
                self.metrics.tool_calls += 1;

                if let Some(cb) = self.on_event.as_mut() {
                    cb(&TurnEvent::ToolCompleted {
                        name: name.as_str(),
                        preview: preview(&outcome.text, 120),
                        is_error: outcome.is_error,
                    });
                }

                results.push(ContentBlock::ToolResult {
                    tool_use_id: id.clone(),
                    content: outcome.text,
                    is_error: outcome.is_error.then_some(true),
                });
            }
            self.messages.push(Message {
                role: Role::User,
                content: results,
            });
        }
    }
}

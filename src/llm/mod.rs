//! Messages-API client and the agentic conversation loop.

mod client;
mod conversation;
mod wire;

pub use client::{ChatApi, ChatCall, ChatRequest, LlmClient};
pub use conversation::{ApiCall, Conversation, SessionMetrics, TurnEvent, estimate_cost_usd};
pub use wire::{ANTHROPIC_VERSION, ContentBlock, Message, MessagesResponse, Role, ToolSpec, Usage};

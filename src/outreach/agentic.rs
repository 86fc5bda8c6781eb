//! Agentic workflow: one conversation, the profile tool, and a system prompt
//! that teaches the model to fix broken URLs by itself. Failed tool calls go
//! back as `is_error` results, which is the whole correction feedback channel.

use crate::ctx::Ctx;
use crate::llm::{Conversation, SessionMetrics};
use crate::outreach::OutreachReport;
use crate::prompts;
use crate::step::StepError;
use crate::tools::ProfileTool;

const MAX_AGENT_TURNS: usize = 10;

/// Conversation wired for outreach: profile tool plus the self-correction
/// system prompt.
pub fn build_outreach_conversation(ctx: &Ctx) -> Result<Conversation, StepError> {
    let chat = ctx
        .chat_handle()
        .ok_or_else(|| StepError::failed("no chat client configured"))?;
    let profiles = ctx
        .profile_handle()
        .ok_or_else(|| StepError::failed("no profile client configured"))?;

    Ok(Conversation::new(chat, ctx.model())
        .with_system(prompts::OUTREACH_AGENT_SYSTEM)
        .with_tool(ProfileTool::new(profiles))
        .with_max_turns(MAX_AGENT_TURNS)
        .with_max_tokens(ctx.max_tokens()))
}

/// Drive one outreach task through an already-built conversation. The
/// caller keeps the conversation, so warm history carries across URLs.
pub fn run_agentic(convo: &mut Conversation, url: &str) -> OutreachReport {
    match convo.send(&prompts::outreach_agent_task(url)) {
        Ok(message) if !message.trim().is_empty() => {
            OutreachReport::success(url, message, convo.metrics().clone())
        }
        Ok(_) => OutreachReport::failure(
            url,
            "agent returned an empty message",
            convo.metrics().clone(),
        ),
        Err(e) => OutreachReport::failure(url, e.to_string(), convo.metrics().clone()),
    }
}

/// Build a fresh conversation and run one URL through it.
pub fn agentic_outreach(ctx: &Ctx, url: &str) -> OutreachReport {
    match build_outreach_conversation(ctx) {
        Ok(mut convo) => run_agentic(&mut convo, url),
        Err(e) => OutreachReport::failure(url, e.to_string(), SessionMetrics::default()),
    }
}

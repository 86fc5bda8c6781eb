//! Reflection pattern for prospect research: draft, collect external
//! feedback, revise. Three tracked sends over a single [`Conversation`],
//! so the model sees its own V1 and the review when writing V2.

use crate::ctx::Ctx;
use crate::display;
use crate::llm::{ContentBlock, Conversation, SessionMetrics, Usage};
use crate::prompts;
use crate::review::ReviewTool;
use crate::step::StepError;
use crate::tools::ProfileTool;
use crate::trace::Tracker;

/// Research sessions span three user turns plus tool round trips, so the
/// cap sits well above the outreach agent's.
const MAX_RESEARCH_TURNS: usize = 15;

/// Research drafts run long; the outreach default would clip them.
const RESEARCH_MAX_TOKENS: u32 = 2000;

/// The three artifacts of a reflection run plus session totals.
#[derive(Debug, Clone)]
pub struct ReflectionOutcome {
    pub v1: String,
    pub feedback: String,
    pub v2: String,
    pub metrics: SessionMetrics,
}

/// Conversation wired for research: profile fetching plus the review tool.
/// `auto_feedback` selects canned reviews over prompting on stdin.
pub fn build_research_conversation(
    ctx: &Ctx,
    auto_feedback: bool,
) -> Result<Conversation, StepError> {
    let chat = ctx
        .chat_handle()
        .ok_or_else(|| StepError::failed("no chat client configured"))?;
    let profiles = ctx
        .profile_handle()
        .ok_or_else(|| StepError::failed("no profile client configured"))?;
    let review = if auto_feedback {
        ReviewTool::auto()
    } else {
        ReviewTool::interactive()
    };

    Ok(Conversation::new(chat, ctx.model())
        .with_system(prompts::RESEARCH_SYSTEM)
        .with_tool(ProfileTool::new(profiles))
        .with_tool(review)
        .with_max_turns(MAX_RESEARCH_TURNS)
        .with_max_tokens(RESEARCH_MAX_TOKENS))
}

// One send bracketed by tracker bookkeeping. Token counts come out of the
// session metrics as a delta, so tool round trips inside the send are
// attributed to the generation that triggered them.
fn tracked_send(
    convo: &mut Conversation,
    tracker: &mut Tracker,
    label: &str,
    prompt: &str,
) -> Result<String, StepError> {
    tracker.start_generation(label, prompt);
    let before = convo.metrics().clone();
    let history_before = convo.history().len();
    let text = convo.send(prompt)?;

    for message in &convo.history()[history_before..] {
        for block in &message.content {
            if let ContentBlock::ToolUse { name, input, .. } = block {
                tracker.log_tool_call(name, input);
            }
        }
    }

    let after = convo.metrics();
    tracker.end_generation(
        &text,
        Usage {
            input_tokens: after.input_tokens - before.input_tokens,
            output_tokens: after.output_tokens - before.output_tokens,
        },
    );
    Ok(text)
}

/// Run the full reflection loop for one prospect URL.
pub fn research_with_reflection(
    convo: &mut Conversation,
    linkedin_url: &str,
    tracker: &mut Tracker,
) -> Result<ReflectionOutcome, StepError> {
    display::banner("TURN 1: Generating Initial Research (V1)");
    let v1 = tracked_send(
        convo,
        tracker,
        "Turn 1: V1 Research",
        &prompts::v1_research_prompt(linkedin_url),
    )?;

    display::banner("TURN 2: Requesting External Feedback");
    let feedback = tracked_send(
        convo,
        tracker,
        "Turn 2: External Feedback",
        prompts::VALIDATION_PROMPT,
    )?;

    display::banner("TURN 3: Reflecting and Revising (V2)");
    let v2 = tracked_send(
        convo,
        tracker,
        "Turn 3: Reflection -> V2",
        &prompts::reflection_prompt(&feedback),
    )?;

    Ok(ReflectionOutcome {
        v1,
        feedback,
        v2,
        metrics: convo.metrics().clone(),
    })
}

/// Print V1, the feedback, and V2 side by side.
pub fn show_comparison(outcome: &ReflectionOutcome) {
    display::banner("RESEARCH EVOLUTION: V1 -> FEEDBACK -> V2");
    println!("\nINITIAL RESEARCH (V1):\n{}", display::preview(&outcome.v1, 1000));
    println!("\n{}", display::minor_rule());
    println!("EXTERNAL FEEDBACK:\n{}", display::preview(&outcome.feedback, 500));
    println!("\n{}", display::minor_rule());
    println!("REVISED RESEARCH (V2):\n{}", display::preview(&outcome.v2, 1000));
}

//! Research agent demo: the reflection pattern with generation tracking.
//!
//! Set `AUTO_FEEDBACK=false` to review the research yourself, and
//! `DEBUG_LLM=true` to see every prompt and response in framed boxes.

use std::process;

use outreach_line::cases::DEMO_PROSPECT;
use outreach_line::display;
use outreach_line::research::{
    build_research_conversation, research_with_reflection, show_comparison,
};
use outreach_line::trace::Tracker;
use outreach_line::{Config, Ctx};

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            eprintln!("copy .env.example to .env and fill in the API keys");
            process::exit(1);
        }
    };
    let ctx = Ctx::from_config(&config);

    display::banner("RESEARCH AGENT: REFLECTION PATTERN");
    println!("Prospect: {}", DEMO_PROSPECT.name);
    println!("URL: {}", DEMO_PROSPECT.url);
    if !config.auto_feedback {
        println!("Interactive review is on: you will be asked to rate the research.");
    }

    let mut tracker = Tracker::new("research-with-reflection", config.debug_llm);
    let mut convo = match build_research_conversation(&ctx, config.auto_feedback) {
        Ok(convo) => convo,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let outcome = match research_with_reflection(&mut convo, DEMO_PROSPECT.url, &mut tracker) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("research failed: {err}");
            process::exit(1);
        }
    };

    show_comparison(&outcome);

    let summary = tracker.summary();
    display::banner("OBSERVABILITY SUMMARY");
    println!("  Trace: {}", tracker.name());
    println!("  Generations: {}", summary.generations);
    for line in tracker.generation_lines() {
        println!("{line}");
    }
    println!(
        "  Total tokens: {} in / {} out",
        summary.input_tokens, summary.output_tokens
    );
    println!("  Total cost: ${:.6}", summary.cost_usd);
    println!("  Duration: {:.2}s", summary.duration_s);
    println!("  Tool calls: {}", outcome.metrics.tool_calls);
}

//! Console rendering shared by the workshop binaries: banners, previews,
//! agent event traces, and the side-by-side comparison table.

use crate::llm::{SessionMetrics, TurnEvent};
use crate::outreach::OutreachReport;

const RULE_WIDTH: usize = 60;
const TABLE_WIDTH: usize = 68;

/// Truncate to `max` characters, appending `...` when anything was cut.
/// Counts chars, not bytes, so multibyte text never splits mid-character.
pub fn preview(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn minor_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// `=` banner with a title line, the way every workshop script opens.
pub fn banner(title: &str) {
    println!("\n{}", rule());
    println!("{title}");
    println!("{}", rule());
}

/// `#` separator for one demo case in a run over several.
pub fn section(label: &str) {
    println!("\n{}", "#".repeat(RULE_WIDTH));
    println!("# {label}");
    println!("{}", "#".repeat(RULE_WIDTH));
}

/// Live trace for the agent loop, fed from [`Conversation::on_event`].
///
/// [`Conversation::on_event`]: crate::llm::Conversation::on_event
pub fn render_event(event: &TurnEvent) {
    match event {
        TurnEvent::AssistantText { text } => {
            println!("\n[agent] {}", preview(text, 300));
        }
        TurnEvent::ToolRequested { name, input } => {
            println!("\n[tool call] {name}");
            println!("  input: {input}");
        }
        TurnEvent::ToolCompleted {
            name,
            preview,
            is_error,
        } => {
            if *is_error {
                println!("  [tool error] {name}: {preview}");
            } else {
                println!("  [tool ok] {name}: {preview}");
            }
        }
        TurnEvent::TurnFinished {
            turn,
            usage,
            stop_reason,
        } => {
            println!(
                "[turn {turn}] input {} / output {} tokens, stop: {stop_reason}",
                usage.input_tokens, usage.output_tokens
            );
        }
    }
}

/// The final message block (or failure line) for one outreach run.
pub fn report_block(report: &OutreachReport) -> String {
    let mut out = String::new();
    if report.success {
        out.push_str(&minor_rule());
        out.push_str("\nGENERATED MESSAGE:\n\n");
        out.push_str(report.message.as_deref().unwrap_or(""));
        out.push('\n');
        out.push_str(&minor_rule());
        out.push('\n');
    } else {
        out.push_str(&format!(
            "FAILED: {}\n",
            report.error.as_deref().unwrap_or("unknown error")
        ));
    }
    out
}

pub fn print_report(report: &OutreachReport) {
    print!("{}", report_block(report));
}

/// Indented metric lines for a finished session.
pub fn metrics_summary(metrics: &SessionMetrics) -> String {
    let mut out = String::new();
    out.push_str(&format!("  Total turns: {}\n", metrics.turns));
    out.push_str(&format!("  Tool calls: {}\n", metrics.tool_calls));
    out.push_str(&format!("  Input tokens: {}\n", metrics.input_tokens));
    out.push_str(&format!("  Output tokens: {}\n", metrics.output_tokens));
    out.push_str(&format!(
        "  Estimated cost: ${:.6}\n",
        metrics.estimated_cost_usd()
    ));
    out
}

fn metric_cells(report: &OutreachReport) -> [String; 5] {
    let m = &report.metrics;
    // A run that never went through the conversation loop has no per-call
    // records; its token counts are unknown rather than zero.
    let tracked = !m.api_calls.is_empty();
    [
        format!(
            "Outcome: {}",
            if report.success { "success" } else { "failed" }
        ),
        format!("Turns: {}", m.turns),
        format!("Tool calls: {}", m.tool_calls),
        if tracked {
            format!("Tokens: {} in / {} out", m.input_tokens, m.output_tokens)
        } else {
            "Tokens: untracked".to_string()
        },
        if tracked {
            format!("Est. cost: ${:.6}", m.estimated_cost_usd())
        } else {
            "Est. cost: untracked".to_string()
        },
    ]
}

// Hard cut to the cell width, no ellipsis, so table lines stay uniform.
fn cell(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Box-drawn side-by-side table for the chained vs agentic comparison.
pub fn comparison_table(chained: &OutreachReport, agentic: &OutreachReport) -> String {
    let left = metric_cells(chained);
    let right = metric_cells(agentic);

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(TABLE_WIDTH)));
    out.push_str(&format!("│ {:^66} │\n", "METRIC COMPARISON"));
    out.push_str(&format!("├{}┬{}┤\n", "─".repeat(34), "─".repeat(33)));
    out.push_str(&format!("│ {:^32} │ {:^31} │\n", "Chained", "Agentic"));
    out.push_str(&format!("├{}┼{}┤\n", "─".repeat(34), "─".repeat(33)));
    for (l, r) in left.iter().zip(right.iter()) {
        out.push_str(&format!(
            "│ {:<32} │ {:<31} │\n",
            cell(l, 32),
            cell(r, 31)
        ));
    }
    out.push_str(&format!("└{}┴{}┘\n", "─".repeat(34), "─".repeat(33)));
    out
}

//! Manual generation tracking and `DEBUG_LLM` console output. Hooks on the
//! runner and the conversation stay the structured channel; this module is
//! the human-readable layer on top.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::llm::{Usage, estimate_cost_usd};

const BOX_WIDTH: usize = 70;
const LINE_WIDTH: usize = 68;

// One box line, hard-truncated so the frame stays aligned.
fn box_line(text: &str) -> String {
    let line: String = if text.chars().count() > LINE_WIDTH {
        let cut: String = text.chars().take(LINE_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    };
    format!("║ {line:<LINE_WIDTH$} ║")
}

/// Render a framed debug box. Pure formatter; [`Tracker`] decides whether it
/// gets printed.
pub fn debug_box(title: &str, content: &str, max_lines: Option<usize>) -> String {
    let border = "═".repeat(BOX_WIDTH);
    let mut out = String::new();
    out.push_str(&format!("╔{border}╗\n"));
    out.push_str(&box_line(&format!("DEBUG: {title}")));
    out.push('\n');
    out.push_str(&format!("╠{border}╣\n"));

    let lines: Vec<&str> = content.split('\n').collect();
    let (shown, hidden) = match max_lines {
        Some(max) if lines.len() > max => (&lines[..max], lines.len() - max),
        _ => (&lines[..], 0),
    };
    for line in shown {
        out.push_str(&box_line(line));
        out.push('\n');
    }
    if hidden > 0 {
        out.push_str(&box_line(&format!("... ({hidden} more lines)")));
        out.push('\n');
    }
    out.push_str(&format!("╚{border}╝"));
    out
}

struct Generation {
    name: String,
    input_tokens: u64,
    output_tokens: u64,
    duration: Duration,
}

/// Totals for a finished trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceSummary {
    pub generations: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub duration_s: f64,
}

/// Tracks LLM generations across a session: one start/end pair per turn,
/// plus tool calls. With debug on, prompts and responses print in boxes.
pub struct Tracker {
    name: String,
    generations: Vec<Generation>,
    started: Instant,
    open: Option<(String, Instant)>,
    debug: bool,
}

impl Tracker {
    pub fn new(name: impl Into<String>, debug: bool) -> Self {
        Self {
            name: name.into(),
            generations: Vec::new(),
            started: Instant::now(),
            open: None,
            debug,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a generation. The prompt prints in a debug box when debug is on.
    pub fn start_generation(&mut self, name: &str, prompt: &str) {
        self.open = Some((name.to_string(), Instant::now()));
        if self.debug {
            println!("\n{}", debug_box(&format!("PROMPT -> {name}"), prompt, None));
        }
    }

    /// Close the open generation with its response and token usage.
    pub fn end_generation(&mut self, output: &str, usage: Usage) {
        let (name, duration) = match self.open.take() {
            Some((name, started)) => (name, started.elapsed()),
            None => ("unknown".to_string(), Duration::ZERO),
        };

        if self.debug {
            let cost = estimate_cost_usd(usage.input_tokens, usage.output_tokens);
            let header = format!(
                "[Input: {} tokens | Output: {} tokens | Cost: ${:.6} | Duration: {}ms]",
                usage.input_tokens,
                usage.output_tokens,
                cost,
                duration.as_millis()
            );
            let content = format!("{header}\n\n{output}");
            println!(
                "\n{}",
                debug_box(&format!("RESPONSE <- {name}"), &content, Some(30))
            );
        }

        self.generations.push(Generation {
            name,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            duration,
        });
    }

    /// Note a tool call. Debug-box only; totals come from session metrics.
    pub fn log_tool_call(&mut self, tool: &str, input: &serde_json::Value) {
        if self.debug {
            let pretty = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
            let content = format!("Tool: {tool}\nInput: {pretty}");
            println!(
                "\n{}",
                debug_box(&format!("TOOL CALL -> {tool}"), &content, None)
            );
        }
    }

    /// One line per recorded generation, for the observability summary.
    pub fn generation_lines(&self) -> Vec<String> {
        self.generations
            .iter()
            .map(|g| {
                format!(
                    "  - {}: {} in / {} out, {}ms",
                    g.name,
                    g.input_tokens,
                    g.output_tokens,
                    g.duration.as_millis()
                )
            })
            .collect()
    }

    pub fn summary(&self) -> TraceSummary {
        let input_tokens: u64 = self.generations.iter().map(|g| g.input_tokens).sum();
        let output_tokens: u64 = self.generations.iter().map(|g| g.output_tokens).sum();
        TraceSummary {
            generations: self.generations.len(),
            input_tokens,
            output_tokens,
            cost_usd: estimate_cost_usd(input_tokens, output_tokens),
            duration_s: self.started.elapsed().as_secs_f64(),
        }
    }
}

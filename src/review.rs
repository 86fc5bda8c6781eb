//! Human-in-the-loop review: the `request_human_review` tool and the
//! feedback it collects. The reflection pattern leans on this as external
//! feedback the model could not synthesize on its own.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::json;

use crate::display;
use crate::tools::{Tool, ToolOutcome};

/// Structured review feedback from a human (or the canned demo reviewer).
#[derive(Debug, Clone, Serialize)]
pub struct ReviewFeedback {
    pub rating: u8,
    pub feedback: Option<String>,
    pub missing_info: Option<String>,
    pub corrections: Option<String>,
    pub approved: bool,
}

impl ReviewFeedback {
    /// Canned feedback for non-interactive demos (`AUTO_FEEDBACK`). Rated
    /// 3/5 with concrete gaps, so the reflection turn has something to fix.
    pub fn auto() -> Self {
        Self {
            rating: 3,
            feedback: Some("Add more specific pain points for their industry".into()),
            missing_info: Some(
                "Missing recent news about the company's market position".into(),
            ),
            corrections: None,
            approved: false,
        }
    }

    /// The text handed back to the model as the tool result.
    pub fn render(&self, prospect: &str) -> String {
        let mut parts = vec![format!("Human Review Feedback for {prospect}:")];
        parts.push(format!("- Rating: {}/5", self.rating));
        parts.push(format!(
            "- Approved: {}",
            if self.approved {
                "Yes"
            } else {
                "No - needs improvement"
            }
        ));
        if let Some(feedback) = &self.feedback {
            parts.push(format!("- Improvement suggestions: {feedback}"));
        }
        if let Some(missing) = &self.missing_info {
            parts.push(format!("- Missing information: {missing}"));
        }
        if let Some(corrections) = &self.corrections {
            parts.push(format!("- Corrections needed: {corrections}"));
        }
        if self.feedback.is_none() && self.missing_info.is_none() && self.corrections.is_none() {
            parts.push("- No specific issues identified".to_string());
        }
        parts.join("\n")
    }
}

// Blank, "none" and "n" all mean "nothing to report".
fn clean_answer(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("n")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn ask_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<Option<String>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(clean_answer(&line))
}

/// Show the research and collect structured feedback. Streams are injected
/// so tests can drive the exchange with a `Cursor`.
///
/// Rating rules: blank or non-numeric defaults to 3, out-of-range clamps to
/// 1..=5, `skip` approves at 4 with no comments. Approval means rating >= 4.
pub fn collect_interactive<R, W>(
    research: &str,
    prospect: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<ReviewFeedback>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(output, "\n{}", display::rule())?;
    writeln!(output, "  HUMAN REVIEW REQUESTED")?;
    writeln!(output, "{}", display::rule())?;
    writeln!(output, "\nProspect: {prospect}")?;
    writeln!(output, "\n--- Research Summary ---")?;
    writeln!(output, "{research}")?;
    writeln!(output, "{}", display::rule())?;
    writeln!(output, "\nPlease review the research above and provide feedback:")?;

    write!(output, "  Rating (1-5, or 'skip' to approve as-is): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    if answer.eq_ignore_ascii_case("skip") {
        writeln!(output, "  Skipped - approving with no specific feedback")?;
        return Ok(ReviewFeedback {
            rating: 4,
            feedback: None,
            missing_info: None,
            corrections: None,
            approved: true,
        });
    }

    let rating = answer.parse::<u8>().unwrap_or(3).clamp(1, 5);
    writeln!(output, "  Your rating: {rating}/5")?;

    let feedback = ask_line(input, output, "  What could be improved? (or 'none'): ")?;
    let missing = ask_line(input, output, "  What's missing? (or 'none'): ")?;
    let corrections = ask_line(input, output, "  Any corrections needed? (or 'none'): ")?;

    Ok(ReviewFeedback {
        rating,
        feedback,
        missing_info: missing,
        corrections,
        approved: rating >= 4,
    })
}

/// How [`ReviewTool`] gathers feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    /// Canned feedback, for demos and tests.
    Auto,
    /// Prompt on stdout and read answers from stdin.
    Interactive,
}

/// `request_human_review`: surface the research to a human mid-conversation.
pub struct ReviewTool {
    mode: ReviewMode,
}

impl ReviewTool {
    pub fn new(mode: ReviewMode) -> Self {
        Self { mode }
    }

    pub fn auto() -> Self {
        Self::new(ReviewMode::Auto)
    }

    pub fn interactive() -> Self {
        Self::new(ReviewMode::Interactive)
    }
}

impl Tool for ReviewTool {
    fn name(&self) -> &'static str {
        "request_human_review"
    }

    fn description(&self) -> &'static str {
        "Request human review of the research output.\n\
         \n\
         USE WHEN: initial research is complete and needs validation, before \
         finalizing a report, or when you are uncertain about the accuracy of \
         your findings.\n\
         RETURNS: a rating (1-5), improvement suggestions, missing information, \
         corrections, and whether the research is approved (rating >= 4).\n\
         This is EXTERNAL FEEDBACK: signals you cannot generate by reasoning \
         alone. Human judgment catches factual errors, missing context, and \
         quality issues that are not visible in the data.\n\
         INPUT: research_summary (the research to review), prospect_name (who \
         it is about)."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "research_summary": {
                    "type": "string",
                    "description": "The research output to be reviewed"
                },
                "prospect_name": {
                    "type": "string",
                    "description": "Name of the prospect being researched"
                }
            },
            "required": ["research_summary"]
        })
    }

    fn call(&mut self, input: &serde_json::Value) -> ToolOutcome {
        let Some(research) = input.get("research_summary").and_then(|v| v.as_str()) else {
            return ToolOutcome::error("the research_summary field is required");
        };
        let prospect = input
            .get("prospect_name")
            .and_then(|v| v.as_str())
            .unwrap_or("the prospect");

        match self.mode {
            ReviewMode::Auto => {
                println!("\n{}", display::rule());
                println!("  HUMAN REVIEW REQUESTED");
                println!("{}", display::rule());
                println!("\nProspect: {prospect}");
                println!("\n--- Research Summary ---");
                println!("{research}");
                println!("{}", display::rule());
                println!("\n  [AUTO_FEEDBACK] canned review: rating 3/5, needs improvement");
                ToolOutcome::ok(ReviewFeedback::auto().render(prospect))
            }
            ReviewMode::Interactive => {
                let stdin = io::stdin();
                let mut reader = stdin.lock();
                let mut writer = io::stdout();
                match collect_interactive(research, prospect, &mut reader, &mut writer) {
                    Ok(feedback) => ToolOutcome::ok(feedback.render(prospect)),
                    Err(e) => ToolOutcome::error(format!("could not read review input: {e}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_review(answers: &str) -> (ReviewFeedback, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let feedback = collect_interactive(
            "Jensen Huang founded NVIDIA in 1993.",
            "Jensen Huang",
            &mut input,
            &mut output,
        )
        .unwrap();
        (feedback, String::from_utf8(output).unwrap())
    }

    #[test]
    fn auto_feedback_is_canned_and_unapproved() {
        let feedback = ReviewFeedback::auto();
        assert_eq!(feedback.rating, 3);
        assert!(!feedback.approved);
        assert!(feedback.feedback.as_deref().unwrap().contains("pain points"));
        assert!(feedback.corrections.is_none());
    }

    #[test]
    fn render_lists_provided_sections_only() {
        let text = ReviewFeedback::auto().render("Jensen Huang");
        assert!(text.starts_with("Human Review Feedback for Jensen Huang:"));
        assert!(text.contains("- Rating: 3/5"));
        assert!(text.contains("- Approved: No - needs improvement"));
        assert!(text.contains("- Improvement suggestions:"));
        assert!(text.contains("- Missing information:"));
        assert!(!text.contains("- Corrections needed:"));
    }

    #[test]
    fn render_notes_when_nothing_was_raised() {
        let feedback = ReviewFeedback {
            rating: 5,
            feedback: None,
            missing_info: None,
            corrections: None,
            approved: true,
        };
        let text = feedback.render("Jensen Huang");
        assert!(text.contains("- Approved: Yes"));
        assert!(text.contains("- No specific issues identified"));
    }

    #[test]
    fn interactive_collects_structured_feedback() {
        let (feedback, shown) =
            run_review("4\nAdd pricing context\nRecent funding news\nnone\n");

        assert_eq!(feedback.rating, 4);
        assert!(feedback.approved);
        assert_eq!(feedback.feedback.as_deref(), Some("Add pricing context"));
        assert_eq!(feedback.missing_info.as_deref(), Some("Recent funding news"));
        assert!(feedback.corrections.is_none());

        assert!(shown.contains("HUMAN REVIEW REQUESTED"));
        assert!(shown.contains("Prospect: Jensen Huang"));
        assert!(shown.contains("founded NVIDIA"));
    }

    #[test]
    fn blank_rating_defaults_to_three() {
        let (feedback, _) = run_review("\nnone\nnone\nnone\n");
        assert_eq!(feedback.rating, 3);
        assert!(!feedback.approved);
    }

    #[test]
    fn out_of_range_rating_clamps() {
        let (feedback, _) = run_review("9\nnone\nnone\nnone\n");
        assert_eq!(feedback.rating, 5);
        assert!(feedback.approved);
    }

    #[test]
    fn skip_approves_without_comments() {
        let (feedback, _) = run_review("skip\n");
        assert_eq!(feedback.rating, 4);
        assert!(feedback.approved);
        assert!(feedback.feedback.is_none());
        assert!(feedback.render("X").contains("No specific issues identified"));
    }

    #[test]
    fn tool_in_auto_mode_returns_rendered_feedback() {
        let mut tool = ReviewTool::auto();
        let outcome = tool.call(&serde_json::json!({
            "research_summary": "Jensen Huang founded NVIDIA in 1993.",
            "prospect_name": "Jensen Huang"
        }));

        assert!(!outcome.is_error);
        assert!(outcome.text.contains("Human Review Feedback for Jensen Huang:"));
        assert!(outcome.text.contains("- Rating: 3/5"));
    }

    #[test]
    fn tool_requires_research_summary() {
        let mut tool = ReviewTool::auto();
        let outcome = tool.call(&serde_json::json!({"prospect_name": "X"}));

        assert!(outcome.is_error);
        assert!(outcome.text.contains("research_summary"));
    }
}

//! The two outreach workflows side by side: a chained pipeline that runs
//! fixed steps and breaks on bad input, and an agentic loop that recovers
//! by correcting the URL itself.

mod agentic;
mod chained;

pub use agentic::{agentic_outreach, build_outreach_conversation, run_agentic};
pub use chained::{
    ComposeMessage, ExtractFields, FetchProfile, OutreachState, ProspectFields,
    build_chained_pipeline, chained_outreach,
};

use serde::Serialize;

use crate::llm::SessionMetrics;

/// Result of one outreach run, either workflow.
#[derive(Debug, Clone, Serialize)]
pub struct OutreachReport {
    pub url: String,
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub metrics: SessionMetrics,
}

impl OutreachReport {
    pub fn success(
        url: impl Into<String>,
        message: impl Into<String>,
        metrics: SessionMetrics,
    ) -> Self {
        Self {
            url: url.into(),
            success: true,
            message: Some(message.into()),
            error: None,
            metrics,
        }
    }

    pub fn failure(
        url: impl Into<String>,
        error: impl Into<String>,
        metrics: SessionMetrics,
    ) -> Self {
        Self {
            url: url.into(),
            success: false,
            message: None,
            error: Some(error.into()),
            metrics,
        }
    }
}

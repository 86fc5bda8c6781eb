use crate::ctx::Ctx;
use std::fmt;

/// The result of running a step: a new state plus what to do next.
pub type StepResult<S> = Result<(S, Outcome), StepError>;

/// A sync pipeline step that transforms state one stage at a time.
///
/// Implement this trait on your own structs and register them into a
/// [`crate::Pipeline`] to build a chained workflow.
pub trait Step<S>: Send + 'static {
    /// A unique name for this step, used for routing with [`Outcome::Next`].
    fn name(&self) -> &'static str;

    /// Run one stage. Returns the updated state and an [`Outcome`] that tells
    /// the runner what to do next.
    fn run(&mut self, state: S, ctx: &mut Ctx) -> StepResult<S>;
}

/// Control flow for the runner.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Follow the pipeline's default next step (set via `.then()`).
    Continue,
    /// Pipeline complete, return the final state.
    Done,
    /// Jump to a specific step by name.
    Next(&'static str),
    /// Re-run the current step (counted against `max_retries`).
    Retry(RetryHint),
    /// Sleep for the given duration, then re-run (counted against `max_retries`).
    Wait(std::time::Duration),
    /// Stop the pipeline with an error.
    Fail(String),
}

/// Metadata attached to an [`Outcome::Retry`] to explain why the step
/// wants to retry.
#[derive(Debug, Clone)]
pub struct RetryHint {
    /// Human-readable reason for the retry.
    pub reason: String,
}

impl RetryHint {
    /// Create a new hint with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error type for pipeline steps, with variants designed around what the
/// caller can do about them.
#[derive(Debug)]
pub enum StepError {
    /// Bad input or step logic error. Don't retry, fix the input.
    Invalid(String),
    /// Transient failure (network, rate limit). Retrying might help.
    Transient(String),
    /// A terminal failure: auth, exhausted budget, explicit Fail.
    Failed(String),
    /// Everything else. Inspect the message for details.
    Other(String),
}

impl From<ureq::Error> for StepError {
    fn from(e: ureq::Error) -> Self {
        StepError::Transient(e.to_string())
    }
}

impl From<std::io::Error> for StepError {
    fn from(e: std::io::Error) -> Self {
        StepError::Other(e.to_string())
    }
}

impl StepError {
    /// Create an [`Invalid`](StepError::Invalid) error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        StepError::Invalid(msg.into())
    }

    /// Create an [`Other`](StepError::Other) error.
    pub fn other(msg: impl Into<String>) -> Self {
        StepError::Other(msg.into())
    }

    /// Create a [`Transient`](StepError::Transient) error.
    pub fn transient(msg: impl Into<String>) -> Self {
        StepError::Transient(msg.into())
    }

    /// Create a [`Failed`](StepError::Failed) error.
    pub fn failed(msg: impl Into<String>) -> Self {
        StepError::Failed(msg.into())
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
            Self::Transient(msg) => write!(f, "transient: {msg}"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

impl std::error::Error for StepError {}

//! LinkedIn outreach automation, built two ways on the same primitives.
//!
//! The chained workflow runs fetch, extract, and compose as a fixed
//! [`Pipeline`] of [`Step`]s: fast and cheap, but a malformed URL kills it.
//! The agentic workflow hands the model a profile tool and a self-correction
//! strategy in a [`Conversation`](llm::Conversation), so it recovers from the
//! same URL on its own. A third flow runs research through a reflection loop:
//! draft, external review, revise.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use outreach_line::outreach::chained_outreach;
//! use outreach_line::{Config, Ctx};
//!
//! let config = Config::from_env()?;
//! let mut ctx = Ctx::from_config(&config);
//!
//! let report = chained_outreach(&mut ctx, "https://www.linkedin.com/in/jenhsunhuang/");
//! if report.success {
//!     println!("{}", report.message.unwrap_or_default());
//! }
//! # Ok::<(), outreach_line::ConfigError>(())
//! ```
//!
//! # Custom steps
//!
//! Pipelines are not outreach-specific. Steps carry state by value and report
//! control flow with outcomes like [`Outcome::Continue`], [`Outcome::Next`],
//! [`Outcome::Retry`], and [`Outcome::Done`].
//!
//! ```rust
//! use outreach_line::{Ctx, Outcome, Pipeline, Runner, Step, StepResult};
//!
//! #[derive(Clone)]
//! struct Draft { words: usize }
//!
//! struct Trim;
//! impl Step<Draft> for Trim {
//!     fn name(&self) -> &'static str { "trim" }
//!     fn run(&mut self, state: Draft, _ctx: &mut Ctx) -> StepResult<Draft> {
//!         Ok((Draft { words: state.words.min(60) }, Outcome::Done))
//!     }
//! }
//!
//! let mut ctx = Ctx::new();
//! let pipeline = Pipeline::builder("demo").register(Trim).build().unwrap();
//! let result = Runner::new(pipeline).run(Draft { words: 80 }, &mut ctx).unwrap();
//! assert_eq!(result.words, 60);
//! ```

pub mod cases;
pub mod config;
mod ctx;
pub mod display;
pub mod llm;
pub mod outreach;
mod pipeline;
pub mod profile;
pub mod prompts;
pub mod research;
pub mod review;
mod runner;
mod step;
#[cfg(test)]
mod testutil;
pub mod tools;
pub mod trace;

pub use config::{Config, ConfigError};
pub use ctx::Ctx;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineError};
pub use runner::{ErrorEvent, Runner, StepEvent};
pub use step::{Outcome, RetryHint, Step, StepError, StepResult};

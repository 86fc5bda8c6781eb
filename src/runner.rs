use crate::{Ctx, Outcome, Pipeline, StepError};
use std::time::{Duration, Instant};

/// Passed to the `on_step` hook after each successful step.
pub struct StepEvent<'a> {
    pub step: &'a str,
    pub outcome: &'a Outcome,
    pub duration: Duration,
    pub step_number: usize,
    pub retries: usize,
}

/// Passed to the `on_error` hook when a step errors or a limit is exceeded.
pub struct ErrorEvent<'a> {
    pub step: &'a str,
    pub error: &'a StepError,
    pub step_number: usize,
}

pub struct Runner<S: Clone + 'static> {
    pl: Pipeline<S>,
    max_steps: usize,
    max_retries: usize,
    on_step: Option<Box<dyn FnMut(&StepEvent)>>,
    on_error: Option<Box<dyn FnMut(&ErrorEvent)>>,
}

impl<S: Clone + 'static> Runner<S> {
    pub fn new(pl: Pipeline<S>) -> Self {
        Self {
            pl,
            max_steps: 10_000,
            max_retries: 3,
            on_step: None,
            on_error: None,
        }
    }

    /// Prevent accidental infinite loops.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Register a callback that fires after each successful step.
    pub fn on_step(mut self, cb: impl FnMut(&StepEvent) + 'static) -> Self {
        self.on_step = Some(Box::new(cb));
        self
    }

    /// Register a callback that fires when a step errors or a limit is exceeded.
    pub fn on_error(mut self, cb: impl FnMut(&ErrorEvent) + 'static) -> Self {
        self.on_error = Some(Box::new(cb));
        self
    }

    /// Set both hooks to print step transitions and errors to stderr.
    pub fn with_tracing(self) -> Self {
        self.on_step(|e| {
            eprintln!(
                "[step {}] {} -> {:?} ({:.3}s)",
                e.step_number,
                e.step,
                e.outcome,
                e.duration.as_secs_f64()
            );
        })
        .on_error(|e| {
            eprintln!("[error] {} at step {}: {}", e.step, e.step_number, e.error);
        })
    }

    pub fn run(&mut self, mut state: S, ctx: &mut Ctx) -> Result<S, StepError> {
        let mut current = self.pl.start();
        let mut retries: usize = 0;
        let mut step_number: usize = 0;

        for _ in 0..self.max_steps {
            step_number += 1;

            let step = self
                .pl
                .step_mut(current)
                .ok_or_else(|| StepError::other(format!("unknown step: {current}")))?;

            let start = Instant::now();
            let result = step.run(state.clone(), ctx);
            let duration = start.elapsed();

            match result {
                Err(err) => {
                    if let Some(cb) = &mut self.on_error {
                        cb(&ErrorEvent {
                            step: current,
                            error: &err,
                            step_number,
                        });
                    }
                    return Err(err);
                }
                Ok((next_state, outcome)) => {
                    if let Some(cb) = &mut self.on_step {
                        cb(&StepEvent {
                            step: current,
                            outcome: &outcome,
                            duration,
                            step_number,
                            retries,
                        });
                    }

                    state = next_state;

                    match outcome {
                        Outcome::Done => return Ok(state),
                        Outcome::Fail(msg) => return Err(StepError::other(msg)),
                        Outcome::Next(step) => {
                            current = step;
                            retries = 0;
                            continue;
                        }
                        Outcome::Continue => {
                            if let Some(next) = self.pl.default_next(current) {
                                current = next;
                                retries = 0;
                                continue;
                            }
                            return Err(StepError::other(format!(
                                "step '{current}' returned Continue but no default next step is configured"
                            )));
                        }
                        Outcome::Retry(hint) => {
                            retries += 1;
                            if retries > self.max_retries {
                                let err = StepError::other(format!(
                                    "step '{}' exceeded max retries ({}): {}",
                                    current, self.max_retries, hint.reason
                                ));
                                if let Some(cb) = &mut self.on_error {
                                    cb(&ErrorEvent {
                                        step: current,
                                        error: &err,
                                        step_number,
                                    });
                                }
                                return Err(err);
                            }
                            continue;
                        }
                        Outcome::Wait(dur) => {
                            retries += 1;
                            if retries > self.max_retries {
                                let err = StepError::other(format!(
                                    "step '{}' exceeded max retries ({}) while waiting",
                                    current, self.max_retries
                                ));
                                if let Some(cb) = &mut self.on_error {
                                    cb(&ErrorEvent {
                                        step: current,
                                        error: &err,
                                        step_number,
                                    });
                                }
                                return Err(err);
                            }
                            std::thread::sleep(dur);
                            continue;
                        }
                    }
                }
            }
        }

        let err = StepError::other(format!(
            "max_steps exceeded (possible infinite loop) in pipeline {}",
            self.pl.name()
        ));
        if let Some(cb) = &mut self.on_error {
            cb(&ErrorEvent {
                step: current,
                error: &err,
                step_number,
            });
        }
        Err(err)
    }
}

use crate::Step;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum PipelineError {
    DuplicateStep(&'static str),
    UnknownStep(&'static str),
    MissingStart,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateStep(name) => write!(f, "duplicate step name: {name}"),
            Self::UnknownStep(name) => write!(f, "unknown step: {name}"),
            Self::MissingStart => write!(f, "pipeline missing start step"),
        }
    }
}

impl std::error::Error for PipelineError {}

// ---------------------------------------------------------------------------
// PipelineBuilder
// ---------------------------------------------------------------------------

pub struct PipelineBuilder<S: Clone + 'static> {
    name: &'static str,
    start: Option<&'static str>,
    chain_last: Option<&'static str>,
    steps: HashMap<&'static str, Box<dyn Step<S>>>,
    default_next: HashMap<&'static str, &'static str>,
    duplicate: Option<&'static str>,
}

impl<S: Clone + 'static> PipelineBuilder<S> {
    pub fn register<T: Step<S>>(mut self, step: T) -> Self {
        let name = step.name();
        if self.steps.contains_key(name) {
            self.duplicate = Some(name);
        }
        self.steps.insert(name, Box::new(step));

        // If this is the first step added and start isn't set, default start to it.
        if self.start.is_none() {
            self.start = Some(name);
        }

        // Also initialize chain_last if it's not set.
        if self.chain_last.is_none() {
            self.chain_last = Some(name);
        }

        self
    }

    pub fn start_at(mut self, step: &'static str) -> Self {
        self.start = Some(step);
        self.chain_last = Some(step);
        self
    }

    /// Chain the next step: current(chain_last) -> next
    pub fn then(mut self, next: &'static str) -> Self {
        let Some(current) = self.chain_last else {
            // No prior step; treat `next` as the start
            self.start = Some(next);
            self.chain_last = Some(next);
            return self;
        };

        self.default_next.insert(current, next);
        self.chain_last = Some(next);
        self
    }

    pub fn build(self) -> Result<Pipeline<S>, PipelineError> {
        // Check for duplicate steps.
        if let Some(name) = self.duplicate {
            return Err(PipelineError::DuplicateStep(name));
        }

        // Check for a start step.
        let start = self.start.ok_or(PipelineError::MissingStart)?;

        // Validate start_at target exists as a registered step.
        if !self.steps.contains_key(start) {
            return Err(PipelineError::UnknownStep(start));
        }

        // Validate every `then` target exists as a registered step.
        for &target in self.default_next.values() {
            if !self.steps.contains_key(target) {
                return Err(PipelineError::UnknownStep(target));
            }
        }

        Ok(Pipeline {
            name: self.name,
            start,
            steps: self.steps,
            default_next: self.default_next,
        })
    }
}

// ---------------------------------------------------------------------------
// Pipeline (validated, only constructed via build())
// ---------------------------------------------------------------------------

pub struct Pipeline<S: Clone + 'static> {
    name: &'static str,
    start: &'static str,
    steps: HashMap<&'static str, Box<dyn Step<S>>>,
    default_next: HashMap<&'static str, &'static str>,
}

impl<S: Clone + 'static> Pipeline<S> {
    pub fn builder(name: &'static str) -> PipelineBuilder<S> {
        PipelineBuilder {
            name,
            start: None,
            chain_last: None,
            steps: HashMap::new(),
            default_next: HashMap::new(),
            duplicate: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // --- stuff the runner uses (keep pub(crate)) ---
    pub(crate) fn start(&self) -> &'static str {
        self.start
    }

    pub(crate) fn step_mut(&mut self, name: &'static str) -> Option<&mut Box<dyn Step<S>>> {
        self.steps.get_mut(name)
    }

    pub(crate) fn default_next(&self, from: &'static str) -> Option<&'static str> {
        self.default_next.get(from).copied()
    }
}

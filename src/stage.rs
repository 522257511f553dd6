use crate::error::Result;
use crate::metrics::StageMetrics;
use std::fmt;
use std::time::Instant;

/// A step of the ranking pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Load input bytes under the size limit
    Reading,
    /// Tokenize and fill the frequency table
    Counting,
    /// Scan the table into the bounded heap
    Selecting,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Stage; 3] = [Stage::Reading, Stage::Counting, Stage::Selecting];

    /// Position of the stage in `ALL`
    pub fn index(self) -> usize {
        match self {
            Stage::Reading => 0,
            Stage::Counting => 1,
            Stage::Selecting => 2,
        }
    }

    /// Get a human-readable name for this stage
    pub fn name(self) -> &'static str {
        match self {
            Stage::Reading => "reading",
            Stage::Counting => "counting",
            Stage::Selecting => "selecting",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a pipeline run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// Whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Idle, Running(Stage::Reading)) => true,
            (Running(Stage::Reading), Running(Stage::Counting)) => true,
            (Running(Stage::Counting), Running(Stage::Selecting)) => true,
            (Running(Stage::Selecting), Done) => true,
            (Running(current), Failed(failed)) => current == failed,
            _ => false,
        }
    }

    /// Done or Failed
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => f.write_str("idle"),
            PipelineState::Running(stage) => write!(f, "{}", stage),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(stage) => write!(f, "failed while {}", stage),
        }
    }
}

/// Drives one run through the stages, timing each and tracking state
pub struct StageRunner {
    state: PipelineState,
    metrics: [StageMetrics; 3],
}

impl StageRunner {
    /// Create a new stage runner that records into `metrics`
    pub fn new(metrics: &[StageMetrics; 3]) -> Self {
        Self {
            state: PipelineState::Idle,
            metrics: metrics.clone(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run `work` as `stage`.
    ///
    /// On error the runner moves to `Failed(stage)` and no later stage may run.
    pub fn run<T, F>(&mut self, stage: Stage, work: F) -> Result<T>
    where
        F: FnOnce(&StageMetrics) -> Result<T>,
    {
        self.transition(PipelineState::Running(stage));

        let metrics = &self.metrics[stage.index()];
        let start = Instant::now();
        let result = work(metrics);
        metrics.record_elapsed(start.elapsed());

        if let Err(e) = &result {
            log::debug!("stage {} failed: {}", stage, e);
            self.transition(PipelineState::Failed(stage));
        }
        result
    }

    /// Mark the run as complete
    pub fn finish(&mut self) {
        self.transition(PipelineState::Done);
    }

    fn transition(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal pipeline transition {} -> {}",
            self.state,
            next
        );
        log::debug!("pipeline state: {} -> {}", self.state, next);
        self.state = next;
    }
}

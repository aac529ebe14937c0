//! The full check → clean → test → lint → build pipeline
//!
//! Steps run strictly in order. The first step that fails ends the run; there
//! are no retries and nothing is rolled back.

use crate::gradle::GradleTask;
use dpd_cli::output::Status;
use dpd_telemetry::Timer;
use std::time::Duration;

/// What a pipeline step does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Verify SDK home and Java
    CheckEnvironment,
    /// Run a Gradle task
    Gradle(GradleTask),
}

/// A labelled pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Label printed before the step runs
    pub label: &'static str,
    /// Operation performed by the step
    pub action: StepAction,
}

/// Steps of the `all` command
pub const FULL_PIPELINE: [Step; 5] = [
    Step {
        label: "Checking environment",
        action: StepAction::CheckEnvironment,
    },
    Step {
        label: "Cleaning",
        action: StepAction::Gradle(GradleTask::Clean),
    },
    Step {
        label: "Running tests",
        action: StepAction::Gradle(GradleTask::Test),
    },
    Step {
        label: "Running lint",
        action: StepAction::Gradle(GradleTask::Lint),
    },
    Step {
        label: "Building debug APK",
        action: StepAction::Gradle(GradleTask::AssembleDebug),
    },
];

/// Pipeline execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet
    Pending,
    /// Step at this index is running
    Running(usize),
    /// Step at this index failed; terminal
    Failed(usize),
    /// Every step succeeded; terminal
    Completed,
}

impl PipelineState {
    /// Leave `Pending` for a pipeline of `len` steps
    pub fn start(self, len: usize) -> Self {
        match self {
            PipelineState::Pending if len == 0 => PipelineState::Completed,
            PipelineState::Pending => PipelineState::Running(0),
            other => other,
        }
    }

    /// Apply the result of the running step
    pub fn advance(self, succeeded: bool, len: usize) -> Self {
        match self {
            PipelineState::Running(i) if !succeeded => PipelineState::Failed(i),
            PipelineState::Running(i) if i + 1 >= len => PipelineState::Completed,
            PipelineState::Running(i) => PipelineState::Running(i + 1),
            other => other,
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Failed(_) | PipelineState::Completed)
    }
}

/// Result of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step that ran
    pub step: Step,
    /// Whether it succeeded
    pub succeeded: bool,
    /// How long it took
    pub duration: Duration,
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Terminal state reached
    pub state: PipelineState,
    /// Executed steps, in order
    pub reports: Vec<StepReport>,
}

impl PipelineOutcome {
    /// True when every step succeeded
    pub fn is_success(&self) -> bool {
        self.state == PipelineState::Completed
    }

    /// The step that stopped the run, if any
    pub fn failed_step(&self) -> Option<&Step> {
        match self.state {
            PipelineState::Failed(i) => self.reports.get(i).map(|r| &r.step),
            _ => None,
        }
    }

    /// Wall time spent in executed steps
    pub fn total_duration(&self) -> Duration {
        self.reports.iter().map(|r| r.duration).sum()
    }
}

/// Ordered sequence of steps with stop-on-first-failure semantics
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Create a pipeline over `steps`
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The five-step `all` pipeline
    pub fn full() -> Self {
        Self::new(FULL_PIPELINE.to_vec())
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step through `perform` until one returns false
    pub fn run(&self, mut perform: impl FnMut(&Step) -> bool) -> PipelineOutcome {
        let total = self.steps.len();
        let mut state = PipelineState::Pending.start(total);
        let mut reports = Vec::with_capacity(total);

        while let PipelineState::Running(i) = state {
            let step = &self.steps[i];
            Status::step(i + 1, total, step.label);
            tracing::info!(step = step.label, index = i, "pipeline step started");

            let timer = Timer::start(step.label);
            let succeeded = perform(step);
            let duration = timer.stop();

            reports.push(StepReport {
                step: *step,
                succeeded,
                duration,
            });
            state = state.advance(succeeded, total);
        }

        debug_assert!(state.is_terminal());
        tracing::info!(?state, steps_run = reports.len(), "pipeline finished");
        PipelineOutcome { state, reports }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline_order() {
        let labels: Vec<_> = Pipeline::full().steps().iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Checking environment",
                "Cleaning",
                "Running tests",
                "Running lint",
                "Building debug APK"
            ]
        );
    }

    #[test]
    fn test_state_transitions() {
        let s = PipelineState::Pending.start(2);
        assert_eq!(s, PipelineState::Running(0));
        let s = s.advance(true, 2);
        assert_eq!(s, PipelineState::Running(1));
        assert_eq!(s.advance(true, 2), PipelineState::Completed);
        assert_eq!(s.advance(false, 2), PipelineState::Failed(1));
    }

    #[test]
    fn test_terminal_states_stay_put() {
        assert_eq!(PipelineState::Failed(0).advance(true, 3), PipelineState::Failed(0));
        assert_eq!(PipelineState::Completed.start(3), PipelineState::Completed);
        assert!(PipelineState::Completed.is_terminal());
        assert!(!PipelineState::Running(1).is_terminal());
        assert!(!PipelineState::Pending.is_terminal());
    }

    #[test]
    fn test_empty_pipeline_completes() {
        let outcome = Pipeline::new(Vec::new()).run(|_| unreachable!());
        assert!(outcome.is_success());
        assert!(outcome.reports.is_empty());
    }

    #[test]
    fn test_halts_at_first_failure() {
        let mut seen = Vec::new();
        let outcome = Pipeline::full().run(|step| {
            seen.push(step.label);
            step.action != StepAction::Gradle(GradleTask::Test)
        });

        assert_eq!(seen, vec!["Checking environment", "Cleaning", "Running tests"]);
        assert_eq!(outcome.state, PipelineState::Failed(2));
        assert_eq!(outcome.failed_step().map(|s| s.label), Some("Running tests"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_all_steps_succeed() {
        let mut count = 0;
        let outcome = Pipeline::full().run(|_| {
            count += 1;
            true
        });

        assert_eq!(count, 5);
        assert!(outcome.is_success());
        assert!(outcome.failed_step().is_none());
        assert!(outcome.reports.iter().all(|r| r.succeeded));
    }
}

//!
//! The revision sweep engine.
//!


pub mod cancellation;
pub mod phase;
pub mod policy;
pub mod report;

use std::time::Instant;

use colored::Colorize;

use crate::builder::Builder;
use crate::checkpoint::Store;
use crate::error::Error;
use crate::model::record::RevisionRecord;
use crate::model::state::SweepState;
use crate::runner::parameters::RunParameters;
use crate::runner::Runner;

use self::cancellation::Cancellation;
use self::phase::Phase;
use self::policy::BuildFailurePolicy;
use self::report::SweepReport;

///
/// The per-sweep settings of the engine.
///
#[derive(Debug, Clone)]
pub struct Settings {
    /// The benchmarked collective, e.g. `all_reduce`.
    pub collective: String,
    /// The benchmark run parameters.
    pub parameters: RunParameters,
    /// The number of revisions between checkpoints.
    pub checkpoint_interval: usize,
    /// The handling of failed builds.
    pub build_failure_policy: BuildFailurePolicy,
}

impl Settings {
    /// The default number of revisions between checkpoints.
    pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 4;

    /// The default collective.
    pub const DEFAULT_COLLECTIVE: &'static str = "all_reduce";
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collective: Self::DEFAULT_COLLECTIVE.to_owned(),
            parameters: RunParameters::default(),
            checkpoint_interval: Self::DEFAULT_CHECKPOINT_INTERVAL,
            build_failure_policy: BuildFailurePolicy::default(),
        }
    }
}

///
/// The revision sweep engine.
///
/// Processes a fixed plan of revisions strictly one at a time, since every build mutates the
/// shared working tree.
///
pub struct Sweep<B, R, S> {
    /// The library builder.
    builder: B,
    /// The benchmark runner.
    runner: R,
    /// The result store.
    store: S,
    /// The sweep settings.
    settings: Settings,
    /// The cancellation checked between revisions.
    cancellation: Cancellation,
    /// Whether the status lines are suppressed.
    quiet: bool,

    /// The accumulated state.
    state: SweepState,
    /// The current phase.
    phase: Phase,
}

impl<B, R, S> Sweep<B, R, S>
where
    B: Builder,
    R: Runner,
    S: Store,
{
    ///
    /// A shortcut constructor.
    ///
    pub fn new(builder: B, runner: R, store: S, settings: Settings) -> Self {
        Self {
            builder,
            runner,
            store,
            settings,
            cancellation: Cancellation::default(),
            quiet: false,

            state: SweepState::default(),
            phase: Phase::Idle,
        }
    }

    ///
    /// Sets the cancellation checked between revisions.
    ///
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    ///
    /// Suppresses the status lines.
    ///
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    ///
    /// Continues from a persisted state.
    ///
    /// The persisted records must be a prefix of the plan, position by position.
    ///
    pub fn resume(&mut self, plan: &[String], state: SweepState) -> Result<(), Error> {
        for record in state.records() {
            let expected = plan.get(record.index).map(String::as_str);
            if expected != Some(record.revision_id.as_str()) {
                self.phase = Phase::Aborted;
                return Err(Error::CheckpointMismatch {
                    index: record.index,
                    expected: expected.unwrap_or("<none>").to_owned(),
                    found: record.revision_id.clone(),
                });
            }
        }
        self.state = state;
        Ok(())
    }

    ///
    /// Runs the sweep over the rest of the plan.
    ///
    pub fn run(&mut self, plan: &[String]) -> Result<SweepReport, Error> {
        let start = Instant::now();
        let mut report = SweepReport::new(plan.len(), self.state.position());
        let last_index = plan.len().checked_sub(1);
        let mut unsaved = false;

        while let Some(revision) = plan.get(self.state.position()) {
            if self.cancellation.is_requested() {
                self.status("Cancelling", "between revisions".to_owned());
                if unsaved {
                    self.checkpoint(&mut report, true)?;
                }
                self.transition(Phase::Cancelled);
                report.phase = Phase::Cancelled;
                report.elapsed = start.elapsed();
                return Ok(report);
            }

            let index = self.state.position();
            self.transition(Phase::PreparingRevision);
            self.status(
                "Sweeping",
                format!("{revision} [{}/{}]", index + 1, plan.len()),
            );

            let record = self.process(index, revision.as_str(), &mut report);
            if record.samples.is_empty() {
                report.empty += 1;
            }
            report.samples += record.samples.len();
            report.processed += 1;
            self.state.push(record);
            unsaved = true;

            let is_last = Some(index) == last_index;
            if index % self.settings.checkpoint_interval.max(1) == 0 || is_last {
                self.transition(Phase::Checkpointing);
                if self.checkpoint(&mut report, is_last)? {
                    unsaved = false;
                }
            }
            self.transition(Phase::Idle);
        }

        self.transition(Phase::Done);
        report.phase = Phase::Done;
        report.elapsed = start.elapsed();
        Ok(report)
    }

    ///
    /// The accumulated state.
    ///
    pub fn state(&self) -> &SweepState {
        &self.state
    }

    ///
    /// The current phase.
    ///
    pub fn phase(&self) -> Phase {
        self.phase
    }

    ///
    /// Consumes the engine and returns its collaborators and state.
    ///
    pub fn into_parts(self) -> (B, R, S, SweepState) {
        (self.builder, self.runner, self.store, self.state)
    }

    ///
    /// Builds, runs, and parses one revision.
    ///
    fn process(&mut self, index: usize, revision: &str, report: &mut SweepReport) -> RevisionRecord {
        self.transition(Phase::Building);
        let build_failed = match self.builder.build(revision) {
            Ok(artifact) => {
                tracing::debug!(revision, artifact = %artifact.display(), "artifact ready");
                false
            }
            Err(error) => {
                report.build_failures += 1;
                tracing::warn!(revision, %error, policy = %self.settings.build_failure_policy, "build failed");
                self.status_error("Build failed", format!("{revision}: {error}"));
                if let Err(error) = self.store.backup_build_log(revision, error.to_log().as_str()) {
                    tracing::warn!(revision, %error, "build log backup failed");
                }
                true
            }
        };

        if build_failed && self.settings.build_failure_policy == BuildFailurePolicy::Skip {
            return RevisionRecord::new(index, revision.to_owned(), vec![])
                .with_build_failed(true);
        }
        if build_failed {
            tracing::debug!(
                revision,
                artifact = %self.builder.fallback_artifact().display(),
                "benchmarking the stale artifact"
            );
        }

        self.transition(Phase::Running);
        let execution = self
            .runner
            .run(self.settings.collective.as_str(), &self.settings.parameters);
        tracing::debug!(
            revision,
            exit_code = ?execution.exit_code,
            seconds = execution.duration.as_secs(),
            "benchmark finished"
        );

        self.transition(Phase::Parsing);
        let samples = crate::parser::parse(execution.output.as_str());
        if samples.is_empty() {
            tracing::warn!(revision, %execution, "benchmark output has no samples");
        }
        if let Err(error) = self.store.backup_log(revision, execution.output.as_str()) {
            tracing::warn!(revision, %error, "raw log backup failed");
        }

        RevisionRecord::new(index, revision.to_owned(), samples).with_build_failed(build_failed)
    }

    ///
    /// Persists the whole state.
    ///
    /// Returns whether the state has been persisted. Failures are fatal only for the final one.
    ///
    fn checkpoint(&mut self, report: &mut SweepReport, is_final: bool) -> Result<bool, Error> {
        match self.store.persist(&self.state) {
            Ok(()) => {
                report.persists += 1;
                Ok(true)
            }
            Err(error) if is_final => {
                self.transition(Phase::Aborted);
                report.phase = Phase::Aborted;
                Err(error)
            }
            Err(error) => {
                report.persist_failures += 1;
                tracing::warn!(%error, records = self.state.records().len(), "checkpoint failed, retrying at the next interval");
                self.status_error("Checkpoint failed", error.to_string());
                Ok(false)
            }
        }
    }

    ///
    /// Moves to the next phase.
    ///
    fn transition(&mut self, phase: Phase) {
        tracing::trace!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
    }

    ///
    /// Prints a status line.
    ///
    fn status(&self, verb: &str, message: String) {
        if !self.quiet {
            println!("{:>12} {message}", verb.bright_green().bold());
        }
    }

    ///
    /// Prints an error status line.
    ///
    fn status_error(&self, verb: &str, message: String) {
        if !self.quiet {
            println!("{:>12} {message}", verb.bright_red().bold());
        }
    }
}

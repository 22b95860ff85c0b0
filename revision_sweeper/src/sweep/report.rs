//!
//! The summary of a finished sweep.
//!

use std::time::Duration;

use colored::Colorize;

use crate::sweep::phase::Phase;

///
/// The summary of a finished sweep.
///
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// The terminal phase.
    pub phase: Phase,
    /// The number of revisions in the plan.
    pub planned: usize,
    /// The number of revisions restored from a checkpoint.
    pub resumed: usize,
    /// The number of revisions processed by this invocation.
    pub processed: usize,
    /// The number of failed builds.
    pub build_failures: usize,
    /// The number of revisions that produced no samples.
    pub empty: usize,
    /// The number of samples collected by this invocation.
    pub samples: usize,
    /// The number of successful checkpoints.
    pub persists: usize,
    /// The number of failed intermediate checkpoints.
    pub persist_failures: usize,
    /// The start time, shown in the summary.
    pub started: chrono::DateTime<chrono::Utc>,
    /// The wall time of the sweep.
    pub elapsed: Duration,
}

impl SweepReport {
    ///
    /// A report of a sweep that has not started yet.
    ///
    pub fn new(planned: usize, resumed: usize) -> Self {
        Self {
            phase: Phase::Idle,
            planned,
            resumed,
            processed: 0,
            build_failures: 0,
            empty: 0,
            samples: 0,
            persists: 0,
            persist_failures: 0,
            started: chrono::Utc::now(),
            elapsed: Duration::default(),
        }
    }

    ///
    /// Whether every planned revision has been recorded.
    ///
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done && self.resumed + self.processed == self.planned
    }
}

impl std::fmt::Display for SweepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "╔═══════════════════════╡ REVISION SWEEP ╞═════════════════════╗"
        )?;
        writeln!(
            f,
            "║                                                              ║"
        )?;
        writeln!(
            f,
            "║     {:14}                   {:>19}     ║",
            "STARTED".bright_black(),
            self.started
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "PROCESSED".green(),
            self.processed.to_string().green(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "RESUMED".bright_black(),
            self.resumed.to_string().bright_black(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "BUILD FAILED".bright_red(),
            self.build_failures.to_string().bright_red(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "EMPTY".yellow(),
            self.empty.to_string().yellow(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "SAMPLES".bright_white(),
            self.samples.to_string().bright_white(),
        )?;
        writeln!(
            f,
            "║     {:14}                            {:10}     ║",
            "CHECKPOINTS".bright_white(),
            format!("{}/{}", self.persists, self.persists + self.persist_failures).bright_white(),
        )?;
        writeln!(
            f,
            "║          {:10} OF {:10} REVISIONS {:15}    ║",
            self.resumed + self.processed,
            self.planned,
            self.phase.to_string().to_uppercase(),
        )?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SweepReport;

    #[test]
    fn summary_shows_start_time() {
        colored::control::set_override(false);
        let mut report = SweepReport::new(3, 1);
        report.started = chrono::DateTime::parse_from_rfc3339("2026-03-04T05:06:07Z")
            .expect("Always valid")
            .with_timezone(&chrono::Utc);

        let summary = report.to_string();
        let line = summary
            .lines()
            .find(|line| line.contains("STARTED"))
            .expect("Always valid");

        assert!(line.contains("2026-03-04 05:06:07"));
        assert_eq!(
            line.chars().count(),
            summary.lines().next().expect("Always valid").chars().count()
        );
    }
}

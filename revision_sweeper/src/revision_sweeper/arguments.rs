//!
//! The revision sweeper arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The revision sweeper arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Prints the debug diagnostics.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the status output.
    #[arg(short, long)]
    pub quiet: bool,

    /// The YAML sweep configuration.
    /// All settings have defaults derived from the working directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The scratch working directory.
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// The number of most recent revisions to sweep.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// The number of revisions between checkpoints.
    #[arg(short = 'k', long)]
    pub checkpoint_interval: Option<usize>,

    /// The benchmarked collective, e.g. `all_reduce`.
    #[arg(long)]
    pub collective: Option<String>,

    /// The handling of failed builds: `stale-artifact` or `skip`.
    #[arg(long)]
    pub build_failure_policy: Option<revision_sweeper::BuildFailurePolicy>,

    /// Benchmarks the configured artifact without building.
    #[arg(long)]
    pub no_build: bool,

    /// Clones the missing repositories into the working directory.
    #[arg(long)]
    pub clone: bool,

    /// Continues from the existing result set.
    #[arg(short, long)]
    pub resume: bool,
}

impl Arguments {
    ///
    /// Loads the configuration and applies the command line overrides.
    ///
    pub fn into_config(self) -> anyhow::Result<revision_sweeper::SweepConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => revision_sweeper::SweepConfig::load(path)?,
            None => revision_sweeper::SweepConfig::default(),
        };
        if let Some(workdir) = self.workdir {
            config.workdir = workdir;
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(checkpoint_interval) = self.checkpoint_interval {
            config.checkpoint_interval = checkpoint_interval;
        }
        if let Some(collective) = self.collective {
            config.collective = collective;
        }
        if let Some(build_failure_policy) = self.build_failure_policy {
            config.build_failure_policy = build_failure_policy;
        }
        if self.no_build {
            config.build = false;
            config.build_suite = false;
        }
        config.validate()
    }
}

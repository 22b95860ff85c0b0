//!
//! The revision sweeper library.
//!

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod process;
pub mod repository;
pub mod runner;
pub mod sweep;
pub mod util;

pub use crate::builder::install_script::InstallScriptBuilder;
pub use crate::builder::suite::SuiteBuilder;
pub use crate::builder::BuildError;
pub use crate::builder::Builder;
pub use crate::builder::NoopBuilder;
pub use crate::checkpoint::FileStore;
pub use crate::checkpoint::Store;
pub use crate::config::SweepConfig;
pub use crate::error::Error;
pub use crate::model::record::RevisionRecord;
pub use crate::model::sample::MetricSample;
pub use crate::model::state::SweepState;
pub use crate::parser::error::Error as ParseError;
pub use crate::parser::layout::LineMatch;
pub use crate::parser::parse;
pub use crate::parser::parse_bytes;
pub use crate::process::Execution;
pub use crate::repository::clone_if_missing;
pub use crate::repository::list_revisions;
pub use crate::runner::parameters::RunParameters;
pub use crate::runner::perf::PerfRunner;
pub use crate::runner::Runner;
pub use crate::sweep::cancellation::Cancellation;
pub use crate::sweep::phase::Phase;
pub use crate::sweep::policy::BuildFailurePolicy;
pub use crate::sweep::report::SweepReport;
pub use crate::sweep::Settings as SweepSettings;
pub use crate::sweep::Sweep;

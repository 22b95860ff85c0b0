//!
//! The revision sweeper binary.
//!

pub(crate) mod arguments;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(anyhow::Error::from)
        .and_then(main_inner)
    {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(error) => {
            eprintln!("{error:?}");
            1
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
/// Returns whether every planned revision has been recorded.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<bool> {
    let quiet = arguments.quiet;
    let resume = arguments.resume;
    let clone = arguments.clone;
    initialize_logging(arguments.verbose, quiet);

    let config = arguments.into_config()?;
    if !quiet {
        println!(
            "    {} {} v{}",
            "Starting".bright_green().bold(),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
        );
    }

    require_executable("git")?;
    if config.build {
        require_executable("bash")?;
        if config.build_suite {
            require_executable("make")?;
        }
    }
    if config.mpi {
        let mpirun = config.mpi_install_dir.join("bin").join("mpirun");
        if !mpirun.is_file() {
            tracing::warn!(path = %mpirun.display(), "the MPI launcher is missing");
        }
    }

    if clone {
        revision_sweeper::clone_if_missing(
            config.workdir.as_path(),
            revision_sweeper::SweepConfig::REPOSITORY_NAME,
            config.repository_url.as_str(),
        )?;
        if config.build_suite || config.binary_directory.is_none() {
            revision_sweeper::clone_if_missing(
                config.workdir.as_path(),
                revision_sweeper::SweepConfig::SUITE_REPOSITORY_NAME,
                config.suite_repository_url.as_str(),
            )?;
        }
    }

    let repository = config.repository_path();
    let plan = revision_sweeper::list_revisions(
        repository.as_path(),
        config.branch.as_str(),
        config.count,
    )?;
    if !quiet {
        println!(
            "     {} {} revisions of `{}` in {}",
            "Planned".bright_green().bold(),
            plan.len(),
            config.branch,
            repository.display(),
        );
    }

    let output_path = config.output_path();
    let store =
        revision_sweeper::FileStore::new(output_path.clone(), config.backup_directory_path())?;
    let state = if resume {
        revision_sweeper::FileStore::load_latest(output_path.as_path())?
    } else {
        revision_sweeper::SweepState::default()
    };

    let cancellation = revision_sweeper::Cancellation::with_stop_file(config.stop_file_path());
    let runner = config.perf_runner();
    let report = if config.build {
        let builder = config.install_script_builder();
        run(
            builder,
            runner,
            store,
            state,
            &plan,
            &config,
            cancellation,
            quiet,
        )?
    } else {
        let builder =
            revision_sweeper::NoopBuilder::new(repository.join(config.artifact.as_path()));
        run(
            builder,
            runner,
            store,
            state,
            &plan,
            &config,
            cancellation,
            quiet,
        )?
    };

    if !quiet {
        print!("{report}");
        println!(
            "    {} sweeping in {}m{:02}s, results in {}",
            "Finished".bright_green().bold(),
            report.elapsed.as_secs() / 60,
            report.elapsed.as_secs() % 60,
            output_path.display(),
        );
    }
    Ok(report.is_complete())
}

///
/// Runs the sweep with the builder.
///
#[allow(clippy::too_many_arguments)]
fn run<B>(
    builder: B,
    runner: revision_sweeper::PerfRunner,
    store: revision_sweeper::FileStore,
    state: revision_sweeper::SweepState,
    plan: &[String],
    config: &revision_sweeper::SweepConfig,
    cancellation: revision_sweeper::Cancellation,
    quiet: bool,
) -> anyhow::Result<revision_sweeper::SweepReport>
where
    B: revision_sweeper::Builder,
{
    let mut sweep = revision_sweeper::Sweep::new(builder, runner, store, config.settings())
        .with_cancellation(cancellation)
        .with_quiet(quiet);
    if !state.is_empty() && !quiet {
        println!(
            "     {} after {} recorded revisions",
            "Resuming".bright_green().bold(),
            state.position(),
        );
    }
    sweep.resume(plan, state)?;
    let report = sweep.run(plan)?;
    Ok(report)
}

///
/// Checks that the executable is available in `PATH`.
///
fn require_executable(name: &str) -> anyhow::Result<()> {
    which::which(name)
        .map(|_| ())
        .map_err(|error| anyhow::anyhow!("The `{name}` executable is not found: {error}"))
}

///
/// Initializes the diagnostics output, overridable with `RUST_LOG`.
///
fn initialize_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

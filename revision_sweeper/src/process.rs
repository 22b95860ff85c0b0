//!
//! The outcome of an external process invocation.
//!

use std::io::Read;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

///
/// The outcome of an external process invocation.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// The command line, for diagnostics.
    pub command: String,
    /// The exit code, or `None` if the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    /// The captured output, with stdout and stderr interleaved as written.
    pub output: String,
    /// The wall time of the invocation.
    pub duration: Duration,
}

impl Execution {
    ///
    /// Runs the command to completion, capturing its output.
    ///
    /// Both standard streams share one pipe, so diagnostics keep their position between
    /// the regular output lines. Never fails. A spawn error is reported in the output text
    /// with no exit code.
    ///
    pub fn capture(command: &mut std::process::Command) -> Self {
        let description = Self::describe(command);
        let start = Instant::now();
        match Self::run_interleaved(command) {
            Ok((exit_code, output)) => Self {
                command: description,
                exit_code,
                output,
                duration: start.elapsed(),
            },
            Err(error) => Self {
                output: format!("{description} subprocess spawning error: {error}"),
                command: description,
                exit_code: None,
                duration: start.elapsed(),
            },
        }
    }

    ///
    /// Runs the command with stdout and stderr redirected into one pipe.
    ///
    /// The command is left with null standard streams, so that the parent holds no write end
    /// of the pipe while reading it.
    ///
    fn run_interleaved(
        command: &mut std::process::Command,
    ) -> std::io::Result<(Option<i32>, String)> {
        let (mut reader, writer) = std::io::pipe()?;
        command.stdin(Stdio::null());
        command.stdout(writer.try_clone()?);
        command.stderr(writer);
        let child = command.spawn();
        command.stdout(Stdio::null());
        command.stderr(Stdio::null());
        let mut child = child?;

        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = child.wait()?;
        read?;

        Ok((
            status.code(),
            String::from_utf8_lossy(output.as_slice()).into_owned(),
        ))
    }

    ///
    /// Whether the process exited with code zero.
    ///
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    ///
    /// Formats the program and its arguments as a single line.
    ///
    pub fn describe(command: &std::process::Command) -> String {
        std::iter::once(command.get_program())
            .chain(command.get_args())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "`{}` exited with code {code}", self.command),
            None => write!(f, "`{}` did not exit normally", self.command),
        }
    }
}

//! Job supervision: run one external command to completion and classify
//! the outcome.
//!
//! The supervisor is deliberately blocking and observe-only. It starts the
//! command, waits for natural termination, and only then compares elapsed
//! wall-clock time against the configured timeout. A job that blows past
//! its deadline keeps running — many cron jobs are not safe to kill
//! mid-flight — and the late completion is reported instead.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Synthetic exit code reported when the shell itself cannot be spawned.
///
/// An unknown *command* already surfaces as the shell's own 127 with the
/// error text captured; this keeps "nothing ran" on the same code.
pub const LAUNCH_FAILURE_CODE: i32 = 127;

/// Immutable configuration for one supervised run.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Shell command line to execute; empty means "send a test notification".
    pub command: String,
    /// Maximum running time in whole seconds before the run counts as
    /// timed out. The CLI default is one hour; the supervisor treats the
    /// value as opaque.
    pub timeout_secs: u64,
    /// Notification addresses, in order. Empty means no mail is ever sent.
    pub recipients: Vec<String>,
    /// When true, a successful run is also reported.
    pub verbose: bool,
}

/// Classification of one supervised run. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The command exited zero within the timeout.
    Success,
    /// The command exited nonzero, or could not be launched at all.
    Failure,
    /// The command completed, but only after the timeout had passed.
    Timeout,
    /// No command was configured; the run exists to exercise delivery.
    TestNotification,
}

/// Everything observed about one run of the supervised command.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Child exit status; [`LAUNCH_FAILURE_CODE`] when the shell could not
    /// be spawned, `-1` when the shell died without an exit code.
    pub exit_code: i32,
    /// Combined stdout and stderr text. Interleaving between the two
    /// streams is best-effort, not a contract.
    pub output: String,
    /// Measured wall-clock duration of the run.
    pub elapsed: Duration,
    /// Whether the whole elapsed seconds strictly exceeded the timeout.
    pub timed_out: bool,
    /// The classification derived from the fields above.
    pub status: RunStatus,
}

impl RunStatus {
    /// Timeout wins over exit code; launch failures arrive here as a
    /// nonzero code like any other failed run.
    fn classify(timed_out: bool, exit_code: i32) -> Self {
        if timed_out {
            Self::Timeout
        } else if exit_code == 0 {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Runs the configured command to completion and classifies the result.
///
/// Blocks the calling thread until the child exits naturally; there is no
/// preemption and no cancellation. All timing state and output buffers are
/// local to this call. The function is infallible by design: a command
/// that cannot be launched is a `Failure` outcome with the error text as
/// its output, so callers handle every run the same way.
#[must_use]
pub fn run(config: &JobConfig) -> RunOutcome {
    if config.command.is_empty() {
        return RunOutcome {
            exit_code: 0,
            output: String::new(),
            elapsed: Duration::ZERO,
            timed_out: false,
            status: RunStatus::TestNotification,
        };
    }

    let started = Instant::now();
    let spawned = Command::new("sh")
        .arg("-c")
        .arg(&config.command)
        .stdin(Stdio::null())
        .output();
    let elapsed = started.elapsed();

    let (exit_code, output) = match spawned {
        Ok(captured) => {
            let mut text = String::from_utf8_lossy(&captured.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&captured.stderr));
            (captured.status.code().unwrap_or(-1), text)
        }
        Err(err) => (LAUNCH_FAILURE_CODE, format!("failed to launch command: {err}")),
    };

    let timed_out = elapsed.as_secs() > config.timeout_secs;
    RunOutcome {
        exit_code,
        output,
        elapsed,
        timed_out,
        status: RunStatus::classify(timed_out, exit_code),
    }
}

//! Report rendering and notification delivery for finished runs.
//!
//! Rendering is pure: subject and body are functions of the config, the
//! outcome, and a caller-supplied finish time, so tests can pin every
//! byte. [`deliver`] owns the decision of whether a report goes out at
//! all and where it lands (mail, console, or nowhere).

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::job::{JobConfig, RunOutcome, RunStatus};
use crate::ports::notifier::Notifier;

/// Most trailing characters of command output embedded in a report body.
pub const MAX_OUTPUT_CHARS: usize = 10_000;

const RULE_WIDTH: usize = 75;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns true when this outcome should produce a report.
///
/// Successes stay quiet unless verbose reporting was requested; every
/// other outcome is always worth telling someone about.
#[must_use]
pub fn should_notify(status: RunStatus, verbose: bool) -> bool {
    match status {
        RunStatus::Success => verbose,
        RunStatus::Failure | RunStatus::Timeout | RunStatus::TestNotification => true,
    }
}

/// Builds the notification subject line for an outcome.
#[must_use]
pub fn subject(status: RunStatus) -> String {
    let event = match status {
        RunStatus::Success => "ran command successfully!",
        RunStatus::Failure => "detected a failure!",
        RunStatus::Timeout => "detected a timeout!",
        RunStatus::TestNotification => "test mail",
    };
    format!("Host {}: cronwrap {event}", host_name())
}

/// Renders the report body for a finished run.
///
/// `finished_at` is supplied by the caller so rendering stays
/// deterministic; the start time is derived from it and the measured
/// elapsed duration.
#[must_use]
pub fn body(config: &JobConfig, outcome: &RunOutcome, finished_at: DateTime<Utc>) -> String {
    let title = match outcome.status {
        RunStatus::TestNotification => {
            return "This is a test notification from cronwrap.".to_string();
        }
        RunStatus::Success => "CRONWRAP RAN COMMAND SUCCESSFULLY:",
        RunStatus::Failure => "CRONWRAP DETECTED A FAILURE ON FOLLOWING COMMAND:",
        RunStatus::Timeout => "CRONWRAP DETECTED A TIMEOUT ON FOLLOWING COMMAND:",
    };
    let started_at = finished_at - outcome.elapsed;
    let hours = outcome.elapsed.as_secs_f64() / 3600.0;

    let mut text = String::new();
    let _ = writeln!(text, "{title}");
    let _ = writeln!(text, "{}\n", "=".repeat(RULE_WIDTH));

    let _ = writeln!(text, "COMMAND:");
    let _ = writeln!(text, "{}\n", config.command);

    let _ = writeln!(text, "COMMAND STARTED:");
    let _ = writeln!(text, "{} UTC\n", started_at.format(TIME_FORMAT));

    let _ = writeln!(text, "COMMAND FINISHED:");
    let _ = writeln!(text, "{} UTC\n", finished_at.format(TIME_FORMAT));

    let _ = writeln!(text, "COMMAND RAN FOR:");
    let _ = writeln!(text, "{} seconds ({hours:.2} hours)\n", outcome.elapsed.as_secs());

    let _ = writeln!(text, "COMMAND'S TIMEOUT IS SET AT:");
    let _ = writeln!(text, "{} seconds\n", config.timeout_secs);

    let _ = writeln!(text, "RETURN CODE WAS:");
    let _ = writeln!(text, "{}\n", outcome.exit_code);

    let _ = writeln!(text, "COMMAND OUTPUT:");
    text.push_str(&trim_output(&outcome.output));
    text
}

/// Decides whether the outcome warrants a report and, if so, sends or
/// prints it.
///
/// A notifier problem is reported as a stderr warning and otherwise
/// ignored; delivery never alters the computed outcome or the process
/// exit code.
pub fn deliver(config: &JobConfig, outcome: &RunOutcome, notifier: &dyn Notifier) {
    if !should_notify(outcome.status, config.verbose) {
        return;
    }

    let text = body(config, outcome, Utc::now());
    if config.recipients.is_empty() {
        // A test run without recipients sends nothing; everything else
        // falls back to the console.
        if outcome.status != RunStatus::TestNotification {
            println!("{text}");
        }
        return;
    }

    if let Err(e) = notifier.notify(&config.recipients, &subject(outcome.status), &text) {
        eprintln!("Warning: failed to send notification: {e}");
    }
}

/// Machine hostname with its first letter upper-cased.
fn host_name() -> String {
    let raw = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "localhost".to_string());
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Localhost".to_string(),
    }
}

/// Keeps the trailing [`MAX_OUTPUT_CHARS`] characters of the output,
/// marking the cut with a leading ellipsis.
fn trim_output(output: &str) -> String {
    match output.char_indices().rev().nth(MAX_OUTPUT_CHARS - 1) {
        Some((idx, _)) if idx > 0 => format!("... {}", &output[idx..]),
        _ => output.to_string(),
    }
}

//! CLI argument definitions.

use clap::Parser;

use crate::duration;
use crate::job::JobConfig;

/// Top-level CLI parser for `cronwrap`.
#[derive(Debug, Parser)]
#[command(
    name = "cronwrap",
    version,
    about = "A cron job wrapper that wraps jobs and enables better error reporting and command timeouts."
)]
pub struct Cli {
    /// Run a command. Could be `cronwrap -c "ls -la"`.
    #[arg(short = 'c', long = "cmd", value_name = "CMD")]
    pub cmd: Option<String>,

    /// Email following users if the command crashes or exceeds the timeout.
    /// Could be `cronwrap -e "johndoe@mail.com, marcy@mail.com"`. Uses the
    /// system's `mail` to send emails. If no command (cmd) is set a test
    /// email is sent.
    #[arg(short = 'e', long = "emails", value_name = "EMAILS")]
    pub emails: Option<String>,

    /// Set the maximum running time, e.g. `-t 2h`, `-t 2m`, `-t 30s`.
    /// If this time is passed an alert email will be sent. The command
    /// will keep running even if the maximum running time is exceeded.
    #[arg(short = 't', long = "time", value_name = "TIME", default_value = "1h")]
    pub time: String,

    /// Will send an email / print to stdout on a successful run.
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "VERBOSE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub verbose: Option<bool>,
}

impl Cli {
    /// Validates the parsed flags into a job configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the timeout token cannot be parsed. Nothing
    /// is launched before this succeeds.
    pub fn into_config(self) -> Result<JobConfig, String> {
        let timeout_secs = duration::parse(&self.time).map_err(|e| e.to_string())?;
        Ok(JobConfig {
            command: self.cmd.unwrap_or_default(),
            timeout_secs,
            recipients: split_emails(self.emails.as_deref().unwrap_or_default()),
            verbose: self.verbose.unwrap_or(false),
        })
    }
}

/// Splits a recipient list on commas and whitespace, dropping empty parts.
fn split_emails(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

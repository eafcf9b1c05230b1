//! Live notifier that delivers mail via a local `mail`-style binary.
//!
//! One invocation per recipient, report body piped to stdin. The binary
//! is argv-spawned, so subjects and recipient addresses never pass
//! through a shell.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::ports::notifier::Notifier;

/// Environment variable naming the mail binary to invoke.
pub const MAILER_ENV: &str = "CRONWRAP_MAILER";

const DEFAULT_MAILER: &str = "mail";

/// Live notifier that runs `mail -s <subject> <recipient>` per recipient.
pub struct LiveNotifier {
    mailer: String,
}

impl LiveNotifier {
    /// Creates a notifier using the binary named by `CRONWRAP_MAILER`,
    /// falling back to the system `mail` command.
    #[must_use]
    pub fn from_env() -> Self {
        Self { mailer: env::var(MAILER_ENV).unwrap_or_else(|_| DEFAULT_MAILER.to_string()) }
    }

    /// Creates a notifier that invokes the given binary.
    #[must_use]
    pub fn with_mailer(mailer: impl Into<String>) -> Self {
        Self { mailer: mailer.into() }
    }
}

impl Notifier for LiveNotifier {
    fn notify(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for recipient in recipients {
            let mut child = Command::new(&self.mailer)
                .arg("-s")
                .arg(subject)
                .arg(recipient)
                .stdin(Stdio::piped())
                .spawn()
                .map_err(|e| format!("failed to spawn {}: {e}", self.mailer))?;

            let mut stdin = child.stdin.take().ok_or("mailer stdin was not piped")?;
            let written = stdin.write_all(body.as_bytes());
            // Close the pipe so the mailer sees EOF on its input.
            drop(stdin);

            let status = child
                .wait()
                .map_err(|e| format!("failed to wait for {}: {e}", self.mailer))?;
            if !status.success() {
                return Err(format!(
                    "{} exited with {status} delivering to {recipient}",
                    self.mailer
                )
                .into());
            }
            written.map_err(|e| format!("failed to write mail body: {e}"))?;
        }
        Ok(())
    }
}

//! Notifier port for delivering alert messages.

/// Delivers an alert message to a list of recipients.
///
/// Abstracting delivery keeps the supervision core free of transport
/// concerns and lets tests assert on exactly what would have been sent.
/// A notifier failure must never mask an already-computed run outcome;
/// callers downgrade it to a warning at the boundary.
pub trait Notifier: Send + Sync {
    /// Sends `body` under `subject` to every address in `recipients`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying delivery mechanism fails.
    fn notify(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

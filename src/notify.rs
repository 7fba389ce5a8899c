//! User-facing notifications raised when an export cannot be produced.

/// Shows a short message to the person who triggered the export.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Logs notifications; used when the host has no UI channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "society_reports::user", "{}", message);
    }
}

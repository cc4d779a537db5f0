#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery channel for a fired alert.
///
/// Delivery is at-most-once: the monitor marks the alert triggered before
/// calling this, and a failure here is logged, not retried.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, target: &str, message: &str) -> Result<(), NotifyError>;
}

/// Writes the alert to the process log. Stands in for email delivery, which
/// is out of scope.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, target: &str, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(recipient = %target, "{message}");
        Ok(())
    }
}

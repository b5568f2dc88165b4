//! Success-notification sinks.
//!
//! The store only ever reports successes; failures surface through its `is_error` flag.

use tokio::sync::mpsc;
use tracing::info;

/// Fire-and-forget sink for user-facing success messages.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
}

/// Writes notifications to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        info!(notification = "success", "{message}");
    }
}

/// Forwards notifications to an unbounded channel, e.g. for a UI event loop.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify_success(&self, message: &str) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.tx.send(message.to_string());
    }
}

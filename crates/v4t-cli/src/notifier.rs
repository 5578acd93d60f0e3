//! Console rendition of client prompts and status lines.

use tracing::debug;

use v4t_core::Notifier;

use crate::output;

/// Prints client notifications to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        output::info(message);
    }

    fn warning(&self, message: &str) {
        output::warning(message);
    }

    fn error(&self, message: &str) {
        output::error(message);
    }

    fn status_started(&self, message: &str) {
        output::status(message);
    }

    fn status_finished(&self, message: &str) {
        debug!(status = message, "Request finished");
    }

    // The CLI prints the tree only on `v4t tree`.
    fn reload_tree(&self) {
        debug!("Tree reload requested");
    }
}

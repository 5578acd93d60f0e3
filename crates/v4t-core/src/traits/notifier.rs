//! User-facing notification sink.

/// Receives the user-visible side effects of client operations.
///
/// The client never prints; front ends decide how prompts, status lines and
/// tree reloads are shown.
pub trait Notifier: Send + Sync {
    /// An informational message ("Logged in").
    fn info(&self, message: &str);

    /// A warning that asks the user to act.
    fn warning(&self, message: &str);

    /// An error message.
    fn error(&self, message: &str);

    /// A request with the given status description was dispatched.
    fn status_started(&self, message: &str);

    /// The request announced by [`Notifier::status_started`] completed.
    fn status_finished(&self, message: &str);

    /// The course tree should be rebuilt from the current session.
    fn reload_tree(&self);
}

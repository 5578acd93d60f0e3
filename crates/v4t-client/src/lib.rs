//! v4t-client - HTTP client for the VS Code 4 Teaching server.
//!
//! [`ApiClient`] owns the session, the error reporter and the cached current
//! user. Front ends plug in a [`v4t_core::Notifier`] to show prompts and
//! status lines.

mod classifier;
mod client;
mod current_user;
pub mod endpoints;
pub mod request;
mod session;
pub mod tree;

pub use classifier::{
    ErrorKind, ErrorReporter, LOGIN_AGAIN_MESSAGE, RETRY_MESSAGE, Recovery, ReportState, Severity,
    Verdict,
};
pub use client::{ApiClient, xsrf_token_from_headers};
pub use current_user::CurrentUser;
pub use session::{AuthState, SessionState, SessionStore};
pub use tree::TreeItem;

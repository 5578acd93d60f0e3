//! Classification of failed requests.
//!
//! Two failure classes get a one-shot soft recovery: 401 (ask the user to
//! log in again) and 403 (fetch a fresh anti-forgery token). Each class has
//! its own [`ReportState`]. A second occurrence while the class is still
//! reported escalates to the generic path, which resets both classes.

use v4t_core::Error;
use v4t_core::error::{AuthError, FailureShape, HttpError};

/// Warning shown on the first 401.
pub const LOGIN_AGAIN_MESSAGE: &str = "It seems that we couldn't log in, please log in.";

/// Warning shown on the first 403.
pub const RETRY_MESSAGE: &str = "Something went wrong, please try again.";

/// Kind of failure, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// First 401.
    Unauthenticated,
    /// First 403, taken as an expired anti-forgery token.
    StaleAntiForgeryToken,
    /// Any other status, or a repeated 401/403.
    GenericServerError,
    /// The request was sent but no response arrived.
    NetworkUnreachable,
    /// The request failed before dispatch.
    LocalRequestFailure,
    /// The bootstrap call carried no usable `XSRF-TOKEN` cookie.
    MissingAntiForgeryToken,
}

/// What the client must do after reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Invalidate the session and reload the tree, back to the login prompt.
    PromptLogin,
    /// Fetch a new anti-forgery token; the session is kept.
    RefreshXsrfToken,
    /// Invalidate the session.
    Reset,
}

/// How the message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Outcome of classifying one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: String,
    pub recovery: Recovery,
}

/// Reporting state of one failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportState {
    #[default]
    Unreported,
    Reported,
    Escalated,
}

impl ReportState {
    fn advance(&mut self) -> ReportState {
        *self = match self {
            ReportState::Unreported => ReportState::Reported,
            ReportState::Reported | ReportState::Escalated => ReportState::Escalated,
        };
        *self
    }
}

/// Turns failures into verdicts, de-duplicating 401 and 403 prompts.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    unauthorized: ReportState,
    forbidden: ReportState,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of the 401 class.
    pub fn unauthorized(&self) -> ReportState {
        self.unauthorized
    }

    /// State of the 403 class.
    pub fn forbidden(&self) -> ReportState {
        self.forbidden
    }

    /// Return both classes to [`ReportState::Unreported`].
    pub fn reset(&mut self) {
        self.unauthorized = ReportState::Unreported;
        self.forbidden = ReportState::Unreported;
    }

    /// Classify a failure and advance the report states.
    pub fn classify(&mut self, error: &Error) -> Verdict {
        match error.kind_hint() {
            FailureShape::Response => match error {
                Error::Http(http) => self.classify_status(http),
                other => local_failure(other),
            },
            FailureShape::NoResponse => Verdict {
                kind: ErrorKind::NetworkUnreachable,
                severity: Severity::Error,
                message: format!("Can't connect to the server. {}", no_response_message(error)),
                recovery: Recovery::Reset,
            },
            FailureShape::Local => match error {
                Error::Auth(AuthError::MissingAntiForgeryToken) => Verdict {
                    kind: ErrorKind::MissingAntiForgeryToken,
                    severity: Severity::Error,
                    message: AuthError::MissingAntiForgeryToken.to_string(),
                    recovery: Recovery::Reset,
                },
                other => local_failure(other),
            },
        }
    }

    fn classify_status(&mut self, http: &HttpError) -> Verdict {
        match http.status {
            401 if self.unauthorized.advance() == ReportState::Reported => Verdict {
                kind: ErrorKind::Unauthenticated,
                severity: Severity::Warning,
                message: LOGIN_AGAIN_MESSAGE.to_string(),
                recovery: Recovery::PromptLogin,
            },
            403 if self.forbidden.advance() == ReportState::Reported => Verdict {
                kind: ErrorKind::StaleAntiForgeryToken,
                severity: Severity::Warning,
                message: RETRY_MESSAGE.to_string(),
                recovery: Recovery::RefreshXsrfToken,
            },
            status => {
                self.reset();
                Verdict {
                    kind: ErrorKind::GenericServerError,
                    severity: Severity::Error,
                    message: format!("Error {}. {}", status, http.body),
                    recovery: Recovery::Reset,
                }
            }
        }
    }
}

fn no_response_message(error: &Error) -> String {
    match error {
        Error::Transport(e) => e.to_string(),
        other => other.to_string(),
    }
}

fn local_failure(error: &Error) -> Verdict {
    Verdict {
        kind: ErrorKind::LocalRequestFailure,
        severity: Severity::Error,
        message: local_message(error),
        recovery: Recovery::Reset,
    }
}

fn local_message(error: &Error) -> String {
    match error {
        Error::Auth(e) => e.to_string(),
        Error::InvalidInput(e) => e.to_string(),
        Error::Request { message } => message.clone(),
        Error::Io(e) => e.to_string(),
        other => other.to_string(),
    }
}

//! Error types for the v4t client.
//!
//! A single error type with explicit variants lets the error classifier tell
//! apart the three failure shapes of a request: a response arrived with an
//! error status, the request was sent but nothing came back, or the request
//! never left the process.

use std::fmt;
use thiserror::Error;

/// The unified error type for v4t operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("server error: {0}")]
    Http(#[from] HttpError),

    /// The request was sent but no response arrived (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session and anti-forgery failures detected locally.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (server URL, arguments).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The request could not be built.
    #[error("request failed: {message}")]
    Request { message: String },

    /// A response arrived but its body could not be decoded.
    #[error("unexpected response: {message}")]
    Decode { message: String },

    /// Reading or writing the session file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the HTTP status when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            _ => None,
        }
    }

    /// Which of the three failure shapes this error has.
    pub fn kind_hint(&self) -> FailureShape {
        match self {
            Error::Http(_) => FailureShape::Response,
            Error::Transport(_) => FailureShape::NoResponse,
            _ => FailureShape::Local,
        }
    }
}

/// Shape of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureShape {
    /// A response arrived with an error status.
    Response,
    /// The request was sent but nothing came back.
    NoResponse,
    /// The request never left the process.
    Local,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Request {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Error::Decode {
                message: err.to_string(),
            }
        } else {
            Error::Transport(TransportError::from(err))
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }
}

/// A non-success response from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text. Structured bodies are re-serialized as compact JSON.
    pub body: String,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create an HTTP error from a raw response body.
    ///
    /// JSON objects and arrays are normalized to compact text; a JSON string
    /// is unwrapped; anything else is kept verbatim.
    pub fn from_body(status: u16, raw: &str) -> Self {
        let body = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(value @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
                serde_json::to_string(&value).unwrap_or_else(|_| raw.to_string())
            }
            _ => raw.to_string(),
        };
        Self { status, body }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// Authentication-related errors raised before or around a request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The anti-forgery bootstrap succeeded but carried no usable `XSRF-TOKEN` cookie.
    #[error("XSRF Token not received")]
    MissingAntiForgeryToken,

    /// No server URL is known for this session.
    #[error("no server configured, please log in")]
    NoServer,

    /// There is no remembered session to work with.
    #[error("no active session")]
    NoSession,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid server URL.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_compacts_json_object_body() {
        let err = HttpError::from_body(400, "{\n  \"message\": \"Course name too short\"\n}");
        assert_eq!(err.body, r#"{"message":"Course name too short"}"#);
    }

    #[test]
    fn http_error_unwraps_json_string_body() {
        let err = HttpError::from_body(404, "\"Not found: course 3\"");
        assert_eq!(err.body, "Not found: course 3");
    }

    #[test]
    fn http_error_keeps_plain_text_body() {
        let err = HttpError::from_body(500, "Internal Server Error");
        assert_eq!(err.body, "Internal Server Error");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn status_only_for_http_errors() {
        let http: Error = HttpError::new(401, "").into();
        assert_eq!(http.status(), Some(401));

        let auth: Error = AuthError::MissingAntiForgeryToken.into();
        assert_eq!(auth.status(), None);
        assert_eq!(
            auth.to_string(),
            "authentication error: XSRF Token not received"
        );
    }

    #[test]
    fn failure_shapes() {
        assert_eq!(
            Error::from(HttpError::new(403, "")).kind_hint(),
            FailureShape::Response
        );
        let transport = TransportError::Timeout {
            message: "30s".to_string(),
        };
        assert_eq!(
            Error::from(transport).kind_hint(),
            FailureShape::NoResponse
        );
        assert_eq!(
            Error::from(AuthError::NoServer).kind_hint(),
            FailureShape::Local
        );
    }
}

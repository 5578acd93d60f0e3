//! v4t-core - Core types and traits for the VS Code 4 Teaching client.

pub mod credentials;
pub mod error;
pub mod model;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use tokens::{JwtToken, XsrfToken};
pub use traits::Notifier;
pub use types::ServerUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

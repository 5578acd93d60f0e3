//! Username and password entered by the user.

use std::fmt;

/// What the user types at the login prompt.
///
/// `Debug` prints the username only, so credentials can be traced with
/// `#[instrument]` fields without the password ending up in a log.
///
/// ```
/// use v4t_core::Credentials;
///
/// let creds = Credentials::new("student1", "s3cret");
/// assert_eq!(creds.username(), "student1");
/// assert!(!format!("{:?}", creds).contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The raw password.
    ///
    /// This is public because the `/api/login` body is built in `v4t-client`,
    /// outside this crate. Nothing else should read it, and the value must
    /// not be logged.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

//! Session tokens.
//!
//! Both tokens are opaque strings handed out by the server. Their `Debug`
//! output is redacted so a logged session never leaks them.

use std::fmt;

macro_rules! session_token {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Returns the raw value, for use in request headers only.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "([REDACTED; {} bytes])"), self.0.len())
            }
        }
    };
}

session_token! {
    /// Bearer token returned by `/api/login`, sent as `Authorization: Bearer <jwt>`.
    JwtToken
}

session_token! {
    /// Anti-forgery token from the `XSRF-TOKEN` cookie, echoed back in the
    /// `X-XSRF-TOKEN` header and the `Cookie` header.
    XsrfToken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_token_hides_value_in_debug() {
        let token = JwtToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert_eq!(debug, "JwtToken([REDACTED; 36 bytes])");
    }

    #[test]
    fn xsrf_token_hides_value_in_debug() {
        let token = XsrfToken::new("0c5a3b54-xsrf");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("0c5a3b54"));
        assert!(debug.starts_with("XsrfToken("));
    }
}

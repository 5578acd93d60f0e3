//! Server URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated V4T server base URL.
///
/// Must be an absolute `http` or `https` URL with a host. Teaching servers are
/// commonly run on a LAN, so plain HTTP is accepted for any host. A trailing
/// slash is removed so API paths can be appended directly.
///
/// # Example
///
/// ```
/// use v4t_core::ServerUrl;
///
/// let server = ServerUrl::new("http://localhost:8080/").unwrap();
/// assert_eq!(server.api_url("/api/csrf"), "http://localhost:8080/api/csrf");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServerUrl(Url);

impl ServerUrl {
    /// Create a new server URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServerUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL for an API path such as `/api/courses`.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.as_str();
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Returns the base URL as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServerUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServerUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServerUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let server = ServerUrl::new("https://v4t.example.edu").unwrap();
        assert_eq!(server.host(), Some("v4t.example.edu"));
    }

    #[test]
    fn http_allowed_on_lan_hosts() {
        let server = ServerUrl::new("http://192.168.1.20:8080").unwrap();
        assert_eq!(server.host(), Some("192.168.1.20"));
    }

    #[test]
    fn api_url_strips_trailing_slash() {
        let server = ServerUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(server.as_str(), "http://localhost:8080");
        assert_eq!(
            server.api_url("/api/courses/3/exercises"),
            "http://localhost:8080/api/courses/3/exercises"
        );
    }

    #[test]
    fn api_url_keeps_path_prefix() {
        let server = ServerUrl::new("https://example.edu/v4t/").unwrap();
        assert_eq!(server.api_url("/api/login"), "https://example.edu/v4t/api/login");
        assert_eq!(server.api_url("api/login"), "https://example.edu/v4t/api/login");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(ServerUrl::new("ftp://example.edu").is_err());
        assert!(ServerUrl::new("file:///tmp/v4t").is_err());
    }

    #[test]
    fn rejects_relative_and_garbage() {
        assert!(ServerUrl::new("/api/login").is_err());
        assert!(ServerUrl::new("undefined").is_err());
        assert!(ServerUrl::new("").is_err());
    }

    #[test]
    fn round_trips_through_serde() {
        let server: ServerUrl = serde_json::from_str("\"http://localhost:8080\"").unwrap();
        assert_eq!(serde_json::to_string(&server).unwrap(), "\"http://localhost:8080\"");
    }
}

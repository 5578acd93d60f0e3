//! Request descriptors and their merge with session state.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use v4t_core::error::{AuthError, Error};
use v4t_core::{JwtToken, Result, ServerUrl, XsrfToken};

/// Header carrying the anti-forgery token.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Cookie carrying the anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Multipart field name used by the upload endpoints.
const UPLOAD_FIELD: &str = "file";

/// How the response body of a request is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
    Text,
}

/// A file sent as a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Body of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(FilePart),
}

/// A logical request to one backend endpoint, independent of session state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: Method,
    pub response_kind: ResponseKind,
    pub body: Option<RequestBody>,
    /// When false, no session credentials are attached.
    pub authenticated: bool,
}

impl RequestDescriptor {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            response_kind: ResponseKind::Json,
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attach a file as a multipart form.
    pub fn file(mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Multipart(FilePart {
            file_name: file_name.into(),
            bytes,
        }));
        self
    }

    /// Expect a raw byte payload.
    pub fn binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// Expect a plain text payload.
    pub fn text(mut self) -> Self {
        self.response_kind = ResponseKind::Text;
        self
    }

    /// Send without session credentials.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// A fully configured request: descriptor merged with the session.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestConfig {
    /// Merge a descriptor with session state.
    ///
    /// Absent tokens simply omit their headers. A missing base URL cannot be
    /// resolved and fails with [`AuthError::NoServer`].
    pub fn build(
        descriptor: &RequestDescriptor,
        base_url: Option<&ServerUrl>,
        jwt_token: Option<&JwtToken>,
        xsrf_token: Option<&XsrfToken>,
    ) -> Result<Self> {
        let base_url = base_url.ok_or(AuthError::NoServer)?;

        let mut headers = HeaderMap::new();
        if descriptor.authenticated {
            if let Some(jwt) = jwt_token {
                headers.insert(
                    AUTHORIZATION,
                    header_value(&format!("Bearer {}", jwt.as_str()))?,
                );
            }
            if let Some(xsrf) = xsrf_token {
                headers.insert(
                    HeaderName::from_static("x-xsrf-token"),
                    header_value(xsrf.as_str())?,
                );
                headers.insert(
                    COOKIE,
                    header_value(&format!("{}={}", XSRF_COOKIE, xsrf.as_str()))?,
                );
            }
        }

        Ok(Self {
            method: descriptor.method.clone(),
            url: base_url.api_url(&descriptor.path),
            headers,
            body: descriptor.body.clone(),
        })
    }

    /// Turn the configuration into a `reqwest` request.
    ///
    /// Multipart bodies get their boundary content type from the form itself.
    pub fn into_request(self, client: &reqwest::Client) -> Result<reqwest::Request> {
        let mut builder = client
            .request(self.method, &self.url)
            .headers(self.headers);

        builder = match self.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(file)) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str("application/zip")?;
                builder.multipart(reqwest::multipart::Form::new().part(UPLOAD_FIELD, part))
            }
            None => builder,
        };

        Ok(builder.build()?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Request {
        message: format!("invalid header value: {}", e),
    })
}

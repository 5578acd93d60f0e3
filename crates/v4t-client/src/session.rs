//! Session store: current tokens and server, persisted to a local file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument, warn};

use v4t_core::{JwtToken, Result, ServerUrl, XsrfToken};

use crate::request::{RequestConfig, RequestDescriptor};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Text written in place of an unset field.
const UNDEFINED: &str = "undefined";

/// Where the session stands in the login protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    XsrfFetched,
    Authenticated,
}

/// In-memory session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub jwt_token: Option<JwtToken>,
    pub xsrf_token: Option<XsrfToken>,
    pub base_url: Option<ServerUrl>,
    pub remember: bool,
}

impl SessionState {
    /// Parse a persisted record: JWT, XSRF token, base URL and remember flag,
    /// one per line.
    ///
    /// Missing lines, empty lines and the literal `undefined` all mean unset.
    /// A base URL that fails validation is dropped.
    fn parse(record: &str) -> Self {
        let mut lines = record.split('\n').map(|l| l.trim_end_matches('\r'));
        let mut field = || {
            lines
                .next()
                .filter(|v| !v.is_empty() && *v != UNDEFINED)
                .map(str::to_string)
        };

        let jwt_token = field().map(JwtToken::new);
        let xsrf_token = field().map(XsrfToken::new);
        let base_url = field().and_then(|url| match ServerUrl::new(&url) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "Ignoring invalid server URL in session file");
                None
            }
        });
        let remember = field().is_some_and(|v| v == "true");

        Self {
            jwt_token,
            xsrf_token,
            base_url,
            remember,
        }
    }

    fn render(&self, remember: bool) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.jwt_token.as_ref().map_or(UNDEFINED, JwtToken::as_str),
            self.xsrf_token.as_ref().map_or(UNDEFINED, XsrfToken::as_str),
            self.base_url.as_ref().map_or(UNDEFINED, ServerUrl::as_str),
            remember,
        )
    }
}

/// Holds the session tokens and server URL shared by every request.
///
/// The store is an explicit context object: the API client owns one and
/// every request is built from a snapshot of it. Requests already in flight
/// keep the tokens they were built with when the session changes.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create an empty store persisted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Returns the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, if any, into memory.
    ///
    /// Returns the record's `remember` flag; a missing file returns `false`.
    /// Tokens and server URL are loaded even when `remember` is false, so a
    /// forgotten session still knows its last server. Whether such tokens
    /// should be used at all is left to the caller: only the return value
    /// says the session is fit for automatic login.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn restore(&self) -> Result<bool> {
        if !self.path.exists() {
            debug!("No session file");
            return Ok(false);
        }

        let record = fs::read_to_string(&self.path)?;
        let restored = SessionState::parse(&record);
        let remember = restored.remember;
        *self.write() = restored;

        debug!(remember, "Session restored");
        Ok(remember)
    }

    /// Overwrite the persisted record with the current state and `remember`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn persist(&self, remember: bool) -> Result<()> {
        let record = {
            let mut state = self.write();
            state.remember = remember;
            state.render(remember)
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, record)?;

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        debug!(remember, "Session persisted");
        Ok(())
    }

    /// Forget the session.
    ///
    /// The record is rewritten with `remember=false` rather than deleted, so
    /// the last server can still be offered. Memory is cleared even when the
    /// write fails; the write error is returned.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn invalidate(&self) -> Result<()> {
        info!("Invalidating session");
        let persisted = self.persist(false);
        *self.write() = SessionState::default();
        persisted
    }

    /// Merge a descriptor with the current tokens and server.
    pub fn build_request_config(&self, descriptor: &RequestDescriptor) -> Result<RequestConfig> {
        let state = self.read();
        RequestConfig::build(
            descriptor,
            state.base_url.as_ref(),
            state.jwt_token.as_ref(),
            state.xsrf_token.as_ref(),
        )
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn base_url(&self) -> Option<ServerUrl> {
        self.read().base_url.clone()
    }

    pub fn set_base_url(&self, base_url: ServerUrl) {
        self.write().base_url = Some(base_url);
    }

    pub fn jwt_token(&self) -> Option<JwtToken> {
        self.read().jwt_token.clone()
    }

    pub fn set_jwt_token(&self, token: JwtToken) {
        self.write().jwt_token = Some(token);
    }

    pub fn xsrf_token(&self) -> Option<XsrfToken> {
        self.read().xsrf_token.clone()
    }

    pub fn set_xsrf_token(&self, token: XsrfToken) {
        self.write().xsrf_token = Some(token);
    }

    /// Returns true if a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.read().jwt_token.is_some()
    }

    pub fn auth_state(&self) -> AuthState {
        let state = self.read();
        if state.jwt_token.is_some() {
            AuthState::Authenticated
        } else if state.xsrf_token.is_some() {
            AuthState::XsrfFetched
        } else {
            AuthState::Anonymous
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

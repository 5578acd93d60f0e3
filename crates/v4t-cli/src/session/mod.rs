//! Session context shared by all commands.

pub mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use v4t_client::{ApiClient, SessionStore};
use v4t_core::ServerUrl;
use v4t_core::error::AuthError;
use v4t_core::model::User;

use crate::notifier::ConsoleNotifier;

/// Message shown when a command needs a remembered session.
pub const NO_SESSION: &str = "No active session. Run 'v4t login' first.";

/// Where the session lives, resolved once from the global flags.
#[derive(Debug)]
pub struct CliContext {
    session_file: PathBuf,
}

impl CliContext {
    pub fn new(session_file: Option<PathBuf>) -> Result<Self> {
        let session_file = storage::session_path(session_file)?;
        debug!(path = %session_file.display(), "Using session file");
        Ok(Self { session_file })
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }

    /// A client over the session file, nothing loaded yet.
    pub fn client(&self) -> Result<ApiClient> {
        let store = SessionStore::new(&self.session_file);
        ApiClient::new(store, Arc::new(ConsoleNotifier)).context("Failed to create HTTP client")
    }

    /// A client with the remembered session restored.
    pub fn logged_in_client(&self) -> Result<ApiClient> {
        let client = self.client()?;
        let remembered = client
            .restore_session()
            .context("Failed to read session file")?;
        if !remembered {
            return Err(AuthError::NoSession).context(NO_SESSION);
        }
        Ok(client)
    }

    /// Server of the last session, whether it was remembered or not.
    ///
    /// Only the URL is read back; the tokens stored next to it are left on
    /// disk and never reach a client.
    pub fn last_server(&self) -> Result<Option<ServerUrl>> {
        let store = SessionStore::new(&self.session_file);
        store.restore().context("Failed to read session file")?;
        Ok(store.base_url())
    }
}

/// Fetch the logged-in user, reporting failures through the client.
pub async fn current_user(client: &ApiClient) -> Result<User> {
    if let Some(user) = client.current_user().get() {
        return Ok(user);
    }
    client
        .reported(client.update_user_info())
        .await
        .context("Failed to fetch user data")
}

//! Location of the persisted session file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// File name of the session record inside the data directory.
const SESSION_FILE: &str = "v4tsession";

/// Resolve the session file path.
///
/// An explicit path wins; otherwise the record lives in the platform data
/// directory. The directory is created when the session is first persisted.
pub fn session_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "v4t").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join(SESSION_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_used_verbatim() {
        let path = PathBuf::from("/tmp/v4t-test/session");
        assert_eq!(session_path(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn default_path_ends_with_session_file() {
        if let Ok(path) = session_path(None) {
            assert!(path.ends_with(SESSION_FILE));
        }
    }
}

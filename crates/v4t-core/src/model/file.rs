use serde::{Deserialize, Serialize};

use super::{Id, ServerCommentThread};

/// A file stored on the server for a user's exercise.
///
/// `comments` is only filled in by the all-comments endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub id: Id,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<ServerCommentThread>>,
}

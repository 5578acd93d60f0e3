use serde::{Deserialize, Serialize};

use super::Id;

/// A comment thread anchored to a line of a server file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCommentThread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub line: u32,
    pub line_text: String,
    #[serde(default)]
    pub comments: Vec<ServerComment>,
}

/// A single comment inside a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerComment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub text: String,
    pub author: String,
}

/// Request body for moving a thread to another line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLineUpdate {
    pub line: u32,
    pub line_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_thread_omits_id() {
        let thread = ServerCommentThread {
            id: None,
            line: 12,
            line_text: "let x = 1;".to_string(),
            comments: vec![ServerComment {
                id: None,
                text: "Use a better name".to_string(),
                author: "teacher".to_string(),
            }],
        };
        let json = serde_json::to_value(&thread).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["lineText"], "let x = 1;");
        assert_eq!(json["comments"][0]["author"], "teacher");
    }
}

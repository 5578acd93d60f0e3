use serde::{Deserialize, Serialize};

use super::{Id, User};

/// An exercise as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Id,
    pub name: String,
}

/// Request body for creating or renaming an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEdit {
    pub name: String,
}

/// Completion state of an exercise for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseUserInfo {
    #[serde(default)]
    pub exercise: Option<Exercise>,
    #[serde(default)]
    pub user: Option<User>,
    pub finished: bool,
}

/// Request body for marking an exercise finished or unfinished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseUserInfoUpdate {
    pub finished: bool,
}

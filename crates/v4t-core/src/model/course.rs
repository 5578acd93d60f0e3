use serde::{Deserialize, Serialize};

use super::{Exercise, Id};

/// A course as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Request body for creating or renaming a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEdit {
    pub name: String,
}

/// Request body for adding users to or removing users from a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManageCourseUsers {
    pub ids: Vec<Id>,
}

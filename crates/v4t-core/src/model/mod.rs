//! Server data model.
//!
//! These types mirror the JSON payloads of the V4T REST API. Field names
//! are camelCase on the wire.

mod comment;
mod course;
mod exercise;
mod file;
mod user;

pub use comment::{CommentLineUpdate, ServerComment, ServerCommentThread};
pub use course::{Course, CourseEdit, ManageCourseUsers};
pub use exercise::{Exercise, ExerciseEdit, ExerciseUserInfo, ExerciseUserInfoUpdate};
pub use file::FileInfo;
pub use user::{LoginRequest, LoginResponse, ROLE_STUDENT, ROLE_TEACHER, Role, User, UserSignup};

/// Server-side identifier of courses, exercises, users, files and comments.
pub type Id = i64;

/// Something that can be shared with a code: a course or an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shareable {
    Course(Id),
    Exercise(Id),
}

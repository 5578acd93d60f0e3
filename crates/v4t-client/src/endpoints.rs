//! V4T REST endpoint descriptors.
//!
//! One function per backend operation, mapping typed arguments to a
//! [`RequestDescriptor`]. Nothing here touches the session or the network.

use v4t_core::Result;
use v4t_core::model::{
    CommentLineUpdate, CourseEdit, ExerciseEdit, ExerciseUserInfoUpdate, Id, LoginRequest,
    ManageCourseUsers, ServerCommentThread, Shareable, UserSignup,
};

use crate::request::RequestDescriptor;

/// File name given to uploaded zip archives.
pub const UPLOAD_FILE_NAME: &str = "template.zip";

// ============================================================================
// Session
// ============================================================================

pub fn csrf() -> RequestDescriptor {
    RequestDescriptor::get("/api/csrf").anonymous()
}

pub fn login(username: &str, password: &str) -> Result<RequestDescriptor> {
    RequestDescriptor::post("/api/login").json(&LoginRequest { username, password })
}

pub fn register(user: &UserSignup) -> Result<RequestDescriptor> {
    RequestDescriptor::post("/api/register").json(user)
}

pub fn register_teacher(user: &UserSignup) -> Result<RequestDescriptor> {
    RequestDescriptor::post("/api/teachers/register").json(user)
}

pub fn current_user() -> RequestDescriptor {
    RequestDescriptor::get("/api/currentuser")
}

// ============================================================================
// Users
// ============================================================================

pub fn all_users() -> RequestDescriptor {
    RequestDescriptor::get("/api/users")
}

pub fn course_users(course_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/courses/{}/users", course_id))
}

pub fn add_users_to_course(course_id: Id, users: &ManageCourseUsers) -> Result<RequestDescriptor> {
    RequestDescriptor::post(format!("/api/courses/{}/users", course_id)).json(users)
}

pub fn remove_users_from_course(
    course_id: Id,
    users: &ManageCourseUsers,
) -> Result<RequestDescriptor> {
    RequestDescriptor::delete(format!("/api/courses/{}/users", course_id)).json(users)
}

pub fn course_creator(course_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/courses/{}/creator", course_id))
}

// ============================================================================
// Courses
// ============================================================================

pub fn add_course(course: &CourseEdit) -> Result<RequestDescriptor> {
    RequestDescriptor::post("/api/courses").json(course)
}

pub fn edit_course(course_id: Id, course: &CourseEdit) -> Result<RequestDescriptor> {
    RequestDescriptor::put(format!("/api/courses/{}", course_id)).json(course)
}

pub fn delete_course(course_id: Id) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/api/courses/{}", course_id))
}

pub fn sharing_code(target: Shareable) -> RequestDescriptor {
    let path = match target {
        Shareable::Course(id) => format!("/api/courses/{}/code", id),
        Shareable::Exercise(id) => format!("/api/exercises/{}/code", id),
    };
    RequestDescriptor::get(path).text()
}

pub fn course_with_code(code: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/courses/code/{}", code))
}

// ============================================================================
// Exercises
// ============================================================================

pub fn course_exercises(course_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/courses/{}/exercises", course_id))
}

pub fn add_exercise(course_id: Id, exercise: &ExerciseEdit) -> Result<RequestDescriptor> {
    RequestDescriptor::post(format!("/api/courses/{}/exercises", course_id)).json(exercise)
}

pub fn edit_exercise(exercise_id: Id, exercise: &ExerciseEdit) -> Result<RequestDescriptor> {
    RequestDescriptor::put(format!("/api/exercises/{}", exercise_id)).json(exercise)
}

pub fn delete_exercise(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/api/exercises/{}", exercise_id))
}

pub fn exercise_user_info(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/exercises/{}/info", exercise_id))
}

pub fn update_exercise_user_info(exercise_id: Id, finished: bool) -> Result<RequestDescriptor> {
    RequestDescriptor::put(format!("/api/exercises/{}/info", exercise_id))
        .json(&ExerciseUserInfoUpdate { finished })
}

pub fn all_students_exercise_user_info(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/exercises/{}/info/teacher", exercise_id))
}

// ============================================================================
// Files
// ============================================================================

pub fn exercise_files(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/exercises/{}/files", exercise_id)).binary()
}

pub fn upload_files(exercise_id: Id, zip: Vec<u8>) -> RequestDescriptor {
    RequestDescriptor::post(format!("/api/exercises/{}/files", exercise_id))
        .file(UPLOAD_FILE_NAME, zip)
}

pub fn template(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/exercises/{}/files/template", exercise_id)).binary()
}

pub fn upload_template(exercise_id: Id, zip: Vec<u8>) -> RequestDescriptor {
    RequestDescriptor::post(format!("/api/exercises/{}/files/template", exercise_id))
        .file(UPLOAD_FILE_NAME, zip)
}

pub fn all_student_files(exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/exercises/{}/teachers/files", exercise_id)).binary()
}

pub fn files_info(username: &str, exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!(
        "/api/users/{}/exercises/{}/files",
        username, exercise_id
    ))
}

// ============================================================================
// Comments
// ============================================================================

pub fn save_comment(file_id: Id, thread: &ServerCommentThread) -> Result<RequestDescriptor> {
    RequestDescriptor::post(format!("/api/files/{}/comments", file_id)).json(thread)
}

pub fn comments(file_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!("/api/files/{}/comments", file_id))
}

pub fn all_comments(username: &str, exercise_id: Id) -> RequestDescriptor {
    RequestDescriptor::get(format!(
        "/api/users/{}/exercises/{}/comments",
        username, exercise_id
    ))
}

pub fn update_comment_thread_line(
    thread_id: Id,
    line: u32,
    line_text: &str,
) -> Result<RequestDescriptor> {
    RequestDescriptor::put(format!("/api/comments/{}/lines", thread_id)).json(
        &CommentLineUpdate {
            line,
            line_text: line_text.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{RequestBody, ResponseKind};
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn csrf_is_anonymous_get() {
        let d = csrf();
        assert_eq!(d.method, Method::GET);
        assert_eq!(d.path, "/api/csrf");
        assert!(!d.authenticated);
    }

    #[test]
    fn login_body_carries_credentials() {
        let d = login("johndoe", "password").unwrap();
        assert_eq!(d.method, Method::POST);
        assert_eq!(
            d.body,
            Some(RequestBody::Json(
                json!({"username": "johndoe", "password": "password"})
            ))
        );
        assert!(d.authenticated);
    }

    #[test]
    fn course_paths() {
        assert_eq!(course_exercises(3).path, "/api/courses/3/exercises");
        assert_eq!(delete_course(3).method, Method::DELETE);
        assert_eq!(course_creator(3).path, "/api/courses/3/creator");
        assert_eq!(course_with_code("abc123").path, "/api/courses/code/abc123");
    }

    #[test]
    fn remove_users_is_delete_with_body() {
        let d = remove_users_from_course(5, &ManageCourseUsers { ids: vec![2, 3] }).unwrap();
        assert_eq!(d.method, Method::DELETE);
        assert_eq!(d.path, "/api/courses/5/users");
        assert_eq!(d.body, Some(RequestBody::Json(json!({"ids": [2, 3]}))));
    }

    #[test]
    fn file_downloads_are_binary() {
        assert_eq!(exercise_files(9).response_kind, ResponseKind::Binary);
        assert_eq!(template(9).path, "/api/exercises/9/files/template");
        assert_eq!(all_student_files(9).path, "/api/exercises/9/teachers/files");
        assert_eq!(all_student_files(9).response_kind, ResponseKind::Binary);
    }

    #[test]
    fn uploads_are_multipart_zip() {
        let d = upload_template(9, vec![0x50, 0x4b]);
        assert_eq!(d.path, "/api/exercises/9/files/template");
        match d.body {
            Some(RequestBody::Multipart(part)) => {
                assert_eq!(part.file_name, "template.zip");
                assert_eq!(part.bytes, vec![0x50, 0x4b]);
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn sharing_code_targets() {
        assert_eq!(sharing_code(Shareable::Course(1)).path, "/api/courses/1/code");
        assert_eq!(
            sharing_code(Shareable::Exercise(2)).path,
            "/api/exercises/2/code"
        );
        assert_eq!(
            sharing_code(Shareable::Course(1)).response_kind,
            ResponseKind::Text
        );
    }

    #[test]
    fn exercise_info_paths() {
        assert_eq!(exercise_user_info(4).path, "/api/exercises/4/info");
        let d = update_exercise_user_info(4, true).unwrap();
        assert_eq!(d.method, Method::PUT);
        assert_eq!(d.body, Some(RequestBody::Json(json!({"finished": true}))));
        assert_eq!(
            all_students_exercise_user_info(4).path,
            "/api/exercises/4/info/teacher"
        );
    }

    #[test]
    fn comment_paths() {
        assert_eq!(comments(8).path, "/api/files/8/comments");
        assert_eq!(
            all_comments("student1", 4).path,
            "/api/users/student1/exercises/4/comments"
        );
        let d = update_comment_thread_line(11, 20, "fn main() {").unwrap();
        assert_eq!(d.path, "/api/comments/11/lines");
        assert_eq!(
            d.body,
            Some(RequestBody::Json(json!({"line": 20, "lineText": "fn main() {"})))
        );
    }
}

use serde::{Deserialize, Serialize};

use super::{Course, Id};

/// Role name granted to teachers.
pub const ROLE_TEACHER: &str = "ROLE_TEACHER";

/// Role name granted to students.
pub const ROLE_STUDENT: &str = "ROLE_STUDENT";

/// A server role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_name: String,
}

/// A user as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub courses: Option<Vec<Course>>,
}

impl User {
    /// Returns true if the user holds the teacher role.
    pub fn is_teacher(&self) -> bool {
        self.roles.iter().any(|r| r.role_name == ROLE_TEACHER)
    }

    /// Returns true if the user holds the student role.
    pub fn is_student(&self) -> bool {
        self.roles.iter().any(|r| r.role_name == ROLE_STUDENT)
    }

    /// Label used when offering the user in a pick list.
    pub fn display_name(&self) -> String {
        let mut label = match (&self.name, &self.last_name) {
            (Some(name), Some(last)) if !name.is_empty() && !last.is_empty() => {
                format!("{} {}", name, last)
            }
            _ => self.username.clone(),
        };
        if self.is_teacher() {
            label.push_str(" (Teacher)");
        }
        label
    }
}

/// Request body for the registration endpoints.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSignup {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
}

impl std::fmt::Debug for UserSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSignup")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Request body for `POST /api/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from `POST /api/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn teacher_role_detected() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "johndoe",
            "roles": [{"roleName": "ROLE_STUDENT"}, {"roleName": "ROLE_TEACHER"}]
        }))
        .unwrap();
        assert!(user.is_teacher());
        assert!(user.courses.is_none());
        assert_eq!(user.display_name(), "johndoe (Teacher)");
    }

    #[test]
    fn student_with_courses() {
        let user: User = serde_json::from_value(json!({
            "id": 2,
            "username": "student1",
            "name": "Ana",
            "lastName": "García",
            "roles": [{"roleName": "ROLE_STUDENT"}],
            "courses": [{"id": 10, "name": "Spring Boot Course"}]
        }))
        .unwrap();
        assert!(!user.is_teacher());
        assert!(user.is_student());
        assert_eq!(user.display_name(), "Ana García");
        let courses = user.courses.unwrap();
        assert_eq!(courses[0].name, "Spring Boot Course");
        assert!(courses[0].exercises.is_empty());
    }

    #[test]
    fn signup_serializes_camel_case_and_hides_password() {
        let signup = UserSignup {
            username: "johndoe".to_string(),
            password: "hunter22".to_string(),
            email: "john@example.edu".to_string(),
            name: "John".to_string(),
            last_name: "Doe".to_string(),
        };
        let json = serde_json::to_value(&signup).unwrap();
        assert_eq!(json["lastName"], "Doe");
        assert!(!format!("{:?}", signup).contains("hunter22"));
    }
}

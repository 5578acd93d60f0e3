//! Cached profile of the logged-in user.

use std::sync::{PoisonError, RwLock};

use v4t_core::model::{Course, User};

/// The user returned by `/api/currentuser`, if any.
#[derive(Debug, Default)]
pub struct CurrentUser {
    user: RwLock<Option<User>>,
}

impl CurrentUser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cached user.
    pub fn get(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn set(&self, user: User) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn reset(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Append a course joined with a sharing code.
    ///
    /// Does nothing when nobody is logged in or the course is already listed.
    pub fn add_new_course(&self, course: Course) {
        let mut guard = self.user.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(user) = guard.as_mut() {
            let courses = user.courses.get_or_insert_with(Vec::new);
            if !courses.iter().any(|c| c.id == course.id) {
                courses.push(course);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User {
            id: 2,
            username: "student1".to_string(),
            email: None,
            name: None,
            last_name: None,
            roles: vec![],
            courses: None,
        }
    }

    fn course(id: i64) -> Course {
        Course {
            id,
            name: format!("Course {}", id),
            exercises: vec![],
        }
    }

    #[test]
    fn add_course_requires_login() {
        let current = CurrentUser::new();
        current.add_new_course(course(1));
        assert!(current.get().is_none());
    }

    #[test]
    fn add_course_skips_duplicates() {
        let current = CurrentUser::new();
        current.set(student());
        current.add_new_course(course(1));
        current.add_new_course(course(1));
        current.add_new_course(course(2));

        let courses = current.get().unwrap().courses.unwrap();
        assert_eq!(courses.len(), 2);
    }

    #[test]
    fn reset_logs_out() {
        let current = CurrentUser::new();
        current.set(student());
        assert!(current.is_logged_in());
        current.reset();
        assert!(!current.is_logged_in());
    }
}

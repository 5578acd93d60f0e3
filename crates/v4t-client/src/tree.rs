//! Course tree projection.
//!
//! Turns the current user and a course's exercises into the items a front
//! end shows. [`roots`] and [`children`] are pure; [`load_roots`] and
//! [`load_children`] fetch what they need through an [`ApiClient`].

use std::fmt;

use tracing::{debug, instrument};

use v4t_core::model::{Course, Exercise, User};

use crate::client::ApiClient;

/// One entry of the course tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeItem {
    Login,
    Signup,
    SignupTeacher,
    Logout,
    AddCourse,
    GetWithCode,
    NoCourses,
    NoExercises,
    /// A course; teachers get management actions on it.
    Course { course: Course, teacher: bool },
    /// An exercise of `course_name`. Teacher items open the students' files,
    /// student items the user's own files.
    Exercise {
        course_name: String,
        exercise: Exercise,
        teacher: bool,
    },
}

impl TreeItem {
    pub fn label(&self) -> &str {
        match self {
            TreeItem::Login => "Login",
            TreeItem::Signup => "Sign up",
            TreeItem::SignupTeacher => "Sign up a new teacher",
            TreeItem::Logout => "Logout",
            TreeItem::AddCourse => "Add course",
            TreeItem::GetWithCode => "Get course with code",
            TreeItem::NoCourses => "No courses available",
            TreeItem::NoExercises => "No exercises available",
            TreeItem::Course { course, .. } => &course.name,
            TreeItem::Exercise { exercise, .. } => &exercise.name,
        }
    }

    /// Returns true for items that have children.
    pub fn is_collapsible(&self) -> bool {
        matches!(self, TreeItem::Course { .. })
    }
}

impl fmt::Display for TreeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level items for `user`, or the login prompt when nobody is logged in.
pub fn roots(user: Option<&User>) -> Vec<TreeItem> {
    let Some(user) = user else {
        return vec![TreeItem::Login, TreeItem::Signup];
    };
    let Some(courses) = &user.courses else {
        return vec![TreeItem::NoCourses];
    };

    let teacher = user.is_teacher();
    let mut items = Vec::with_capacity(courses.len() + 4);
    if user.is_student() {
        items.push(TreeItem::GetWithCode);
    }
    if teacher {
        items.push(TreeItem::AddCourse);
    }
    items.extend(courses.iter().map(|course| TreeItem::Course {
        course: course.clone(),
        teacher,
    }));
    if teacher {
        items.push(TreeItem::SignupTeacher);
    }
    items.push(TreeItem::Logout);
    items
}

/// Items below a course.
pub fn children(course: &Course, exercises: &[Exercise], teacher: bool) -> Vec<TreeItem> {
    if exercises.is_empty() {
        return vec![TreeItem::NoExercises];
    }
    exercises
        .iter()
        .map(|exercise| TreeItem::Exercise {
            course_name: course.name.clone(),
            exercise: exercise.clone(),
            teacher,
        })
        .collect()
}

/// Build the top-level items, restoring a remembered session if needed.
///
/// A failed user refresh is reported through the client and yields the
/// login prompt.
#[instrument(skip(client))]
pub async fn load_roots(client: &ApiClient) -> Vec<TreeItem> {
    if let Some(user) = client.current_user().get() {
        return roots(Some(&user));
    }

    match client.restore_session() {
        Ok(true) => {}
        Ok(false) => return roots(None),
        Err(e) => {
            debug!(error = %e, "Session file unreadable");
            return roots(None);
        }
    }

    match client.reported(client.update_user_info()).await {
        Ok(user) => roots(Some(&user)),
        Err(_) => roots(None),
    }
}

/// Fetch a course's exercises and build its items.
///
/// A failed fetch is reported through the client and yields
/// [`TreeItem::NoExercises`].
#[instrument(skip(client, course), fields(course_id = course.id))]
pub async fn load_children(client: &ApiClient, course: &Course) -> Vec<TreeItem> {
    let teacher = client
        .current_user()
        .get()
        .is_some_and(|user| user.is_teacher());

    match client.reported(client.get_exercises(course.id)).await {
        Ok(exercises) => children(course, &exercises, teacher),
        Err(_) => vec![TreeItem::NoExercises],
    }
}

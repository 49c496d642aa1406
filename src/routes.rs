// src/routes.rs

use crate::models::user::UserRole;

pub const INDEX: &str = "/";
pub const LOGIN: &str = "/login";

pub const STUDENT_DASHBOARD: &str = "/student/dashboard";
pub const STUDENT_SUBJECTS: &str = "/student/subjects";

pub const TEACHER_DASHBOARD: &str = "/teacher/dashboard";
pub const TEACHER_SUBJECTS: &str = "/teacher/subjects";
pub const TEACHER_QUIZZES: &str = "/teacher/quizzes";

pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

/// Navigation target after sign-in (or for the shell's role guard).
/// Unauthenticated visitors are sent to the login page.
pub fn dashboard_path(role: Option<UserRole>) -> &'static str {
    match role {
        Some(UserRole::Student) => STUDENT_DASHBOARD,
        Some(UserRole::Teacher) => TEACHER_DASHBOARD,
        Some(UserRole::Admin) => ADMIN_DASHBOARD,
        None => LOGIN,
    }
}

pub fn student_subject_path(subject_id: &str) -> String {
    format!("{}/{}", STUDENT_SUBJECTS, subject_id)
}

pub fn take_quiz_path(quiz_id: &str) -> String {
    format!("/student/quizzes/{}/take", quiz_id)
}

pub fn edit_quiz_path(quiz_id: &str) -> String {
    format!("{}/{}/edit", TEACHER_QUIZZES, quiz_id)
}

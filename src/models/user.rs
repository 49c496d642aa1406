// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Role of an authenticated user.
///
/// The core treats the role as an opaque attribute of the user; only the
/// navigation layer inspects it to pick a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

/// An authenticated platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// DTO for the login stub.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 100, message = "Email must be between 3 and 100 characters."))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

// src/services/auth.rs

use std::sync::RwLock;

use validator::Validate;

use crate::error::AppError;
use crate::models::user::{LoginRequest, User, UserRole};

/// Mock session/identity provider.
///
/// The role is derived from the login identifier ("student"/"teacher"/
/// "admin" substring); the rest of the system treats it as an opaque
/// attribute of the authenticated user. Holds at most one signed-in user
/// per process, matching the single-user-per-process assumption.
pub struct AuthService {
    current: RwLock<Option<User>>,
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Signs a user in. Fails when the identifier matches no known role.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let (id, name, role) = if email.contains("student") {
            ("1", "Student User", UserRole::Student)
        } else if email.contains("teacher") {
            ("2", "Teacher User", UserRole::Teacher)
        } else if email.contains("admin") {
            ("3", "Admin User", UserRole::Admin)
        } else {
            return Err(AppError::AuthError(format!(
                "No account matches '{}'",
                email
            )));
        };

        let user = User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        };

        tracing::info!("User {} signed in as {:?}", user.id, user.role);

        *self.current.write().expect("auth lock poisoned") = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.current.write().expect("auth lock poisoned").take() {
            tracing::info!("User {} signed out", user.id);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().expect("auth lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("auth lock poisoned").is_some()
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

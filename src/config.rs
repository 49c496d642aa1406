// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,

    /// Login identity the demo binary signs in with.
    pub demo_student_email: String,
    pub demo_teacher_email: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let demo_student_email = env::var("DEMO_STUDENT_EMAIL")
            .unwrap_or_else(|_| "student@example.com".to_string());

        let demo_teacher_email = env::var("DEMO_TEACHER_EMAIL")
            .unwrap_or_else(|_| "teacher@example.com".to_string());

        Self {
            rust_log,
            demo_student_email,
            demo_teacher_email,
        }
    }
}

// src/services/mod.rs

pub mod attempts;
pub mod auth;
pub mod curriculum;
pub mod quizzes;

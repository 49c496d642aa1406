// src/lib.rs

pub mod authoring;
pub mod config;
pub mod error;
pub mod grading;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod session;
pub mod state;

// Re-export the types most callers touch.
pub use error::AppError;
pub use state::AppState;

// src/models/mod.rs

pub mod attempt;
pub mod curriculum;
pub mod quiz;
pub mod user;

// src/models/mod.rs

pub mod content;
pub mod course;
pub mod feedback;
pub mod grading;
pub mod objective;
pub mod preference;
pub mod quiz_result;

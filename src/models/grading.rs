// src/models/grading.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for `POST /grade-quiz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GradeQuizRequest {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(custom(function = validate_answer))]
    pub answer: String,
    pub chapter_title: String,
    pub chapter_description: String,
}

fn validate_answer(answer: &str) -> Result<(), validator::ValidationError> {
    if answer.trim().is_empty() {
        return Err(validator::ValidationError::new("answer_required"));
    }
    Ok(())
}

/// The service's verdict on one free-text answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Observed range is 0-100; the service owns the scale.
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub correct_points: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

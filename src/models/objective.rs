// src/models/objective.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for `POST /generate-objectives`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObjectivesRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    /// "ko" or "en".
    #[validate(length(min = 2, max = 5))]
    pub language: String,
}

/// A suggested learning path offered before course generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub target_audience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectivesResponse {
    pub objectives: Vec<ObjectiveItem>,
}

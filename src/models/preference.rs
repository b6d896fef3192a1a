// src/models/preference.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for `POST /user/preferences`, filled from the three survey steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserPreferenceRequest {
    #[validate(length(min = 1))]
    pub learning_goal: String,
    #[validate(length(min = 1))]
    pub learning_style: String,
    #[validate(length(min = 1))]
    pub desired_depth: String,
}

// src/planner.rs

use std::sync::Arc;

use crate::{
    api::ContentService,
    chapter::RequestInfo,
    error::AppError,
    models::{
        course::{Course, GenerateCourseRequest},
        objective::{ObjectiveItem, ObjectivesRequest},
    },
};

pub const DEFAULT_LANGUAGE: &str = "ko";
pub const DEFAULT_DIFFICULTY: &str = "중급";
pub const DEFAULT_MAX_CHAPTERS: u32 = 3;

/// Topic → objectives → course, producing the context the chapter view needs.
pub struct CoursePlanner {
    service: Arc<dyn ContentService>,
    topic: String,
    language: String,
    objectives: Vec<ObjectiveItem>,
    selected: Option<i64>,
}

impl CoursePlanner {
    pub fn new(service: Arc<dyn ContentService>, topic: impl Into<String>) -> Self {
        Self {
            service,
            topic: topic.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            objectives: Vec::new(),
            selected: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn objectives(&self) -> &[ObjectiveItem] {
        &self.objectives
    }

    pub fn selected_objective(&self) -> Option<&ObjectiveItem> {
        let id = self.selected?;
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Fetches learning objectives for the topic, replacing any earlier suggestions.
    pub async fn suggest_objectives(&mut self) -> Result<&[ObjectiveItem], AppError> {
        let request = ObjectivesRequest {
            topic: self.topic.clone(),
            language: self.language.clone(),
        };

        let response = self.service.generate_objectives(&request).await.map_err(|e| {
            tracing::error!("Failed to generate objectives for '{}': {}", self.topic, e);
            e
        })?;

        self.objectives = response.objectives;
        self.selected = None;
        Ok(&self.objectives)
    }

    /// Returns `false` if `objective_id` was not among the suggestions.
    pub fn select_objective(&mut self, objective_id: i64) -> bool {
        if self.objectives.iter().any(|o| o.id == objective_id) {
            self.selected = Some(objective_id);
            true
        } else {
            false
        }
    }

    /// Generates the course for the selected objective (if any).
    pub async fn generate_course(
        &self,
        difficulty: &str,
        max_chapters: u32,
    ) -> Result<(Course, RequestInfo), AppError> {
        let request = GenerateCourseRequest {
            topic: self.topic.clone(),
            difficulty: difficulty.to_string(),
            max_chapters,
            course_description: None,
            selected_objective: self
                .selected_objective()
                .map(|o| format!("{}: {}", o.title, o.description)),
            language: Some(self.language.clone()),
        };

        let response = self.service.generate_course(&request).await.map_err(|e| {
            tracing::error!("Failed to generate course for '{}': {}", self.topic, e);
            e
        })?;
        tracing::info!(
            "Generated course {} with {} chapters",
            response.course.id,
            response.course.chapters.len()
        );

        let info = RequestInfo {
            topic: self.topic.clone(),
            course_description: response.course.description.clone(),
        };
        Ok((response.course, info))
    }
}

// src/models/course.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One chapter of a generated course.
/// Field names follow the service's camelCase contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique within its course.
    #[serde(rename = "chapterId")]
    pub chapter_id: i64,

    #[serde(rename = "chapterTitle")]
    pub title: String,

    #[serde(rename = "chapterDescription")]
    pub description: String,
}

/// A generated course. The order of `chapters` is the navigation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    pub chapters: Vec<Chapter>,
}

impl Course {
    /// Position of `chapter_id` in the navigation order.
    pub fn chapter_index(&self, chapter_id: i64) -> Option<usize> {
        self.chapters.iter().position(|c| c.chapter_id == chapter_id)
    }

    pub fn chapter(&self, chapter_id: i64) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.chapter_id == chapter_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub course: Course,
}

/// DTO for `POST /generate-course`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Topic must be between 1 and 200 characters."))]
    pub topic: String,
    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,
    #[validate(range(min = 1, max = 10, message = "A course has between 1 and 10 chapters."))]
    pub max_chapters: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Row of `GET /courses`, with progress statistics computed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListItem {
    pub id: i64,
    pub topic: String,
    pub description: String,
    pub level: String,
    pub created_at: String,
    pub chapter_count: u32,
    pub completed_chapters: u32,
    /// Percentage, 0-100.
    pub progress: u32,
}

impl CourseListItem {
    pub fn is_completed(&self) -> bool {
        self.progress == 100
    }
}

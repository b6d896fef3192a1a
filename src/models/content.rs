// src/models/content.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::course::Chapter;

/// DTO for `POST /generate-chapter-content` and `POST /download-chapter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ChapterRequest {
    #[validate(length(min = 1))]
    pub course_title: String,
    pub course_description: String,
    #[validate(length(min = 1))]
    pub chapter_title: String,
    pub chapter_description: String,
}

/// Concept or exercise body. `contents` is markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub contents: String,
}

/// Multiple-choice item, graded locally against `answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqItem {
    pub question: String,
    pub options: Vec<String>,
    /// One of `options`, compared by exact string equality.
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MultipleChoiceQuiz {
    #[serde(default)]
    pub quizes: Vec<McqItem>,
}

/// Open-ended prompt, graded by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTextItem {
    pub quiz: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdvancedLearning {
    #[serde(default)]
    pub quizes: Vec<FreeTextItem>,
}

/// Everything generated for one chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContent {
    pub chapter: Chapter,
    pub concept: Section,
    pub exercise: Section,
    pub quiz: MultipleChoiceQuiz,
    #[serde(default)]
    pub advanced_learning: AdvancedLearning,
}

/// Response of `POST /download-chapter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub filename: String,
    pub content: String,
}

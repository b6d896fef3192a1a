// src/api/mod.rs

pub mod client;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        content::{ChapterContent, ChapterRequest, DownloadResponse},
        course::{CourseListItem, CourseResponse, GenerateCourseRequest},
        feedback::{FeedbackRequest, FeedbackResponse},
        grading::{GradeQuizRequest, GradingResult},
        objective::{ObjectivesRequest, ObjectivesResponse},
        preference::UserPreferenceRequest,
        quiz_result::QuizResultListResponse,
    },
};

pub use client::HttpContentService;

/// The remote content service contract.
///
/// One method per endpoint; none of them retry. The HTTP implementation is
/// [`HttpContentService`]; tests substitute scripted implementations.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn generate_objectives(&self, req: &ObjectivesRequest) -> Result<ObjectivesResponse, AppError>;

    async fn generate_course(&self, req: &GenerateCourseRequest) -> Result<CourseResponse, AppError>;

    async fn generate_chapter_content(&self, req: &ChapterRequest) -> Result<ChapterContent, AppError>;

    async fn grade_quiz(&self, req: &GradeQuizRequest) -> Result<GradingResult, AppError>;

    async fn download_chapter(&self, req: &ChapterRequest) -> Result<DownloadResponse, AppError>;

    async fn submit_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, AppError>;

    async fn save_preferences(&self, req: &UserPreferenceRequest) -> Result<(), AppError>;

    async fn list_courses(&self) -> Result<Vec<CourseListItem>, AppError>;

    async fn get_course(&self, course_id: i64) -> Result<CourseResponse, AppError>;

    async fn delete_course(&self, course_id: i64) -> Result<(), AppError>;

    async fn list_quiz_results(&self) -> Result<QuizResultListResponse, AppError>;

    /// `true` when the service answers its health check; never an error.
    async fn check_health(&self) -> bool;

    async fn config_status(&self) -> Result<BTreeMap<String, serde_json::Value>, AppError>;
}

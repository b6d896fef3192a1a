// src/api/client.rs

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;
use validator::Validate;

use super::ContentService;
use crate::{
    config::Config,
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

/// reqwest-backed [`ContentService`].
#[derive(Debug, Clone)]
pub struct HttpContentService {
    http: Client,
    base_url: Url,
}

impl HttpContentService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http, config.api_base_url.clone()))
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, AppError> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("{} /{} failed to send: {:?}", method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = AppError::from_response(status.as_u16(), &text);
        tracing::error!("{} /{} returned {}: {}", method, path, status, err);
        Err(err)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + Validate + Sync,
        T: DeserializeOwned,
    {
        body.validate()?;
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(Method::GET, path, None).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    async fn generate_objectives(&self, req: &ObjectivesRequest) -> Result<ObjectivesResponse, AppError> {
        self.post_json("generate-objectives", req).await
    }

    async fn generate_course(&self, req: &GenerateCourseRequest) -> Result<CourseResponse, AppError> {
        self.post_json("generate-course", req).await
    }

    async fn generate_chapter_content(&self, req: &ChapterRequest) -> Result<ChapterContent, AppError> {
        self.post_json("generate-chapter-content", req).await
    }

    async fn grade_quiz(&self, req: &GradeQuizRequest) -> Result<GradingResult, AppError> {
        self.post_json("grade-quiz", req).await
    }

    async fn download_chapter(&self, req: &ChapterRequest) -> Result<DownloadResponse, AppError> {
        self.post_json("download-chapter", req).await
    }

    async fn submit_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, AppError> {
        self.post_json("feedback", req).await
    }

    async fn save_preferences(&self, req: &UserPreferenceRequest) -> Result<(), AppError> {
        req.validate()?;
        // Body is not part of the contract; only the status matters.
        self.send(Method::POST, "user/preferences", Some(serde_json::to_value(req)?))
            .await?;
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<CourseListItem>, AppError> {
        self.get_json("courses").await
    }

    async fn get_course(&self, course_id: i64) -> Result<CourseResponse, AppError> {
        self.get_json(&format!("courses/{}", course_id)).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<(), AppError> {
        self.send(Method::DELETE, &format!("courses/{}", course_id), None)
            .await?;
        Ok(())
    }

    async fn list_quiz_results(&self) -> Result<QuizResultListResponse, AppError> {
        self.get_json("quiz-results").await
    }

    async fn check_health(&self) -> bool {
        match self.send(Method::GET, "health", None).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                false
            }
        }
    }

    async fn config_status(&self) -> Result<BTreeMap<String, serde_json::Value>, AppError> {
        self.get_json("config").await
    }
}

// src/chapter/navigation.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{content::ChapterRequest, course::{Chapter, Course}};

/// What the learner asked for when the course was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub topic: String,
    #[serde(default)]
    pub course_description: Option<String>,
}

impl RequestInfo {
    /// Content generation request for `chapter`. Without a description the topic stands in.
    pub fn chapter_request(&self, chapter: &Chapter) -> ChapterRequest {
        let course_description = self
            .course_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.topic)
            .to_string();

        ChapterRequest {
            course_title: self.topic.clone(),
            course_description,
            chapter_title: chapter.title.clone(),
            chapter_description: chapter.description.clone(),
        }
    }
}

/// Navigation context as handed over by the host; any part may be missing.
#[derive(Debug, Clone, Default)]
pub struct ChapterLocation {
    pub course: Option<Course>,
    pub request_info: Option<RequestInfo>,
    pub chapter_id: Option<i64>,
}

/// A complete navigation context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContext {
    pub course: Course,
    pub request_info: RequestInfo,
    pub chapter_id: i64,
}

/// Some part of the navigation context was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingContext;

impl ChapterLocation {
    pub fn new(course: Course, request_info: RequestInfo, chapter_id: i64) -> Self {
        Self {
            course: Some(course),
            request_info: Some(request_info),
            chapter_id: Some(chapter_id),
        }
    }

    pub fn validate(self) -> Result<ValidContext, MissingContext> {
        match (self.course, self.request_info, self.chapter_id) {
            (Some(course), Some(request_info), Some(chapter_id)) => Ok(ValidContext {
                course,
                request_info,
                chapter_id,
            }),
            _ => Err(MissingContext),
        }
    }
}

/// Side effects the controller asks of whatever hosts it (router, window, test double).
pub trait NavigationHost: Send + Sync {
    /// Leave for the entry screen. Called once per failed `enter`.
    fn redirect_to_entry(&self);

    /// The learner finished the last chapter of `course_id`.
    fn course_completed(&self, course_id: i64);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The host has already been told to redirect.
    MissingContext,
    ChapterNotFound(i64),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::MissingContext => write!(f, "navigation context is missing"),
            NavigationError::ChapterNotFound(id) => write!(f, "chapter {} not found", id),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Which forward action the view should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Next(i64),
    /// Last chapter: finishing leaves the chapter flow.
    CompleteCourse,
}

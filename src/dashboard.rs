// src/dashboard.rs

use std::sync::Arc;

use crate::{api::ContentService, error::AppError, models::course::CourseListItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// The learner's saved courses.
pub struct Dashboard {
    service: Arc<dyn ContentService>,
    courses: Vec<CourseListItem>,
    filter: CourseFilter,
}

impl Dashboard {
    pub fn new(service: Arc<dyn ContentService>) -> Self {
        Self {
            service,
            courses: Vec::new(),
            filter: CourseFilter::All,
        }
    }

    /// Replaces the list. On failure the previous list is kept.
    pub async fn load(&mut self) -> Result<(), AppError> {
        let courses = self.service.list_courses().await.map_err(|e| {
            tracing::error!("Failed to load courses: {}", e);
            e
        })?;
        self.courses = courses;
        Ok(())
    }

    pub fn courses(&self) -> &[CourseListItem] {
        &self.courses
    }

    pub fn filter(&self) -> CourseFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CourseFilter) {
        self.filter = filter;
    }

    pub fn filtered(&self) -> Vec<&CourseListItem> {
        self.courses
            .iter()
            .filter(|c| match self.filter {
                CourseFilter::All => true,
                CourseFilter::Completed => c.is_completed(),
            })
            .collect()
    }

    pub fn stats(&self) -> DashboardStats {
        let completed = self.courses.iter().filter(|c| c.is_completed()).count();
        DashboardStats {
            total: self.courses.len(),
            in_progress: self.courses.len() - completed,
            completed,
        }
    }

    /// Removes the course locally only once the service confirms the delete.
    pub async fn delete(&mut self, course_id: i64) -> Result<(), AppError> {
        self.service.delete_course(course_id).await.map_err(|e| {
            tracing::error!("Failed to delete course {}: {}", course_id, e);
            e
        })?;

        self.courses.retain(|c| c.id != course_id);
        tracing::info!("Deleted course {}", course_id);
        Ok(())
    }
}

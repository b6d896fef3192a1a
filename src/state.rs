// src/state.rs

use std::sync::Arc;

use crate::{
    api::{ContentService, HttpContentService},
    chapter::{ChapterController, NavigationHost},
    config::Config,
    dashboard::Dashboard,
    error::AppError,
    planner::CoursePlanner,
    session::SessionContext,
};

/// Everything one browsing session shares: configuration, the service client and
/// the session context. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<dyn ContentService>,
    pub session: SessionContext,
}

impl AppState {
    /// Session backed by the HTTP service at `config.api_base_url`.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let service = HttpContentService::new(&config)?;
        tracing::info!("Using content service at {}", service.base_url());

        Ok(Self::with_service(config, Arc::new(service)))
    }

    pub fn with_service(config: Config, service: Arc<dyn ContentService>) -> Self {
        Self {
            config,
            service,
            session: SessionContext::new(),
        }
    }

    /// A chapter view sharing this session's survey state.
    pub fn chapter_controller(&self, host: Arc<dyn NavigationHost>) -> ChapterController {
        ChapterController::new(self.service.clone(), self.session.clone(), host)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.service.clone())
    }

    pub fn planner(&self, topic: impl Into<String>) -> CoursePlanner {
        CoursePlanner::new(self.service.clone(), topic)
    }
}

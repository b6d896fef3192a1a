// src/session.rs

use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

const SURVEY_PENDING: u8 = 0;
const SURVEY_OPEN: u8 = 1;
const SURVEY_COMPLETED: u8 = 2;

/// Per-session state shared across chapter navigations.
///
/// Lifecycle of the survey gate:
/// * starts pending,
/// * the first content generation of the session claims it (`try_open_survey`),
/// * submitting the survey marks it completed,
/// * a view closed with the survey unanswered hands the claim back (`release_survey`),
/// * once completed it stays completed while the session lives.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    survey: Arc<AtomicU8>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the one survey opening of this session.
    /// Returns `true` for exactly one caller; every later call returns `false`.
    pub fn try_open_survey(&self) -> bool {
        self.survey
            .compare_exchange(SURVEY_PENDING, SURVEY_OPEN, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Gives back a claim whose survey was never answered, so the next chapter entry
    /// opens it again. No effect once the survey is completed.
    pub fn release_survey(&self) -> bool {
        self.survey
            .compare_exchange(SURVEY_OPEN, SURVEY_PENDING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Idempotent.
    pub fn complete_survey(&self) {
        self.survey.store(SURVEY_COMPLETED, Ordering::Release);
    }

    pub fn survey_completed(&self) -> bool {
        self.survey.load(Ordering::Acquire) == SURVEY_COMPLETED
    }
}

// src/chapter/feedback.rs

use std::fmt;

use crate::{
    config::{MAX_RATING, MIN_RATING},
    error::AppError,
    models::feedback::FeedbackRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackStatus {
    #[default]
    Editing,
    Submitting,
    /// Terminal for this chapter view.
    Submitted,
}

#[derive(Debug)]
pub enum FeedbackError {
    /// Rating is 0 (nothing picked). Nothing was sent.
    RatingRequired,
    RatingOutOfRange(u8),
    /// Already sent, or a send is in flight.
    Closed,
    NotLoaded,
    Submit(AppError),
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackError::RatingRequired => write!(f, "별점을 선택해주세요."),
            FeedbackError::RatingOutOfRange(r) => {
                write!(f, "rating {} is outside {}..={}", r, MIN_RATING, MAX_RATING)
            }
            FeedbackError::Closed => write!(f, "feedback is not editable"),
            FeedbackError::NotLoaded => write!(f, "no chapter is open"),
            FeedbackError::Submit(err) => write!(f, "feedback submission failed: {}", err),
        }
    }
}

impl std::error::Error for FeedbackError {}

/// End-of-chapter rating form. One successful submission per chapter view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackForm {
    rating: u8,
    comment: String,
    status: FeedbackStatus,
}

impl FeedbackForm {
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn status(&self) -> FeedbackStatus {
        self.status
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), FeedbackError> {
        self.ensure_editable()?;
        if rating > MAX_RATING {
            return Err(FeedbackError::RatingOutOfRange(rating));
        }
        self.rating = rating;
        Ok(())
    }

    pub fn set_comment(&mut self, comment: &str) -> Result<(), FeedbackError> {
        self.ensure_editable()?;
        self.comment = comment.to_string();
        Ok(())
    }

    /// Validates locally and moves to `Submitting`. The blank comment is sent as `None`.
    pub fn begin_submit(&mut self, chapter_title: &str) -> Result<FeedbackRequest, FeedbackError> {
        self.ensure_editable()?;
        if self.rating < MIN_RATING {
            return Err(FeedbackError::RatingRequired);
        }

        let comment = self.comment.trim();
        let request = FeedbackRequest {
            chapter_title: chapter_title.to_string(),
            rating: self.rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        };

        self.status = FeedbackStatus::Submitting;
        Ok(request)
    }

    pub fn complete(&mut self) {
        if self.status == FeedbackStatus::Submitting {
            self.status = FeedbackStatus::Submitted;
        }
    }

    /// Back to editing with rating and comment kept, so the learner can retry.
    pub fn fail(&mut self) {
        if self.status == FeedbackStatus::Submitting {
            self.status = FeedbackStatus::Editing;
        }
    }

    fn ensure_editable(&self) -> Result<(), FeedbackError> {
        match self.status {
            FeedbackStatus::Editing => Ok(()),
            _ => Err(FeedbackError::Closed),
        }
    }
}

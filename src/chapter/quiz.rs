// src/chapter/quiz.rs

use std::fmt;

use crate::{error::AppError, models::grading::GradingResult};

/// State of one free-text ("advanced") quiz item.
///
/// `Unanswered -> Answering -> Submitting -> Graded`, and `Graded -> Unanswered` via reset.
/// The answer text travels with the state, so locking and clearing always happen together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FreeTextSlot {
    #[default]
    Unanswered,
    Answering {
        answer: String,
    },
    Submitting {
        answer: String,
    },
    Graded {
        answer: String,
        result: GradingResult,
    },
}

impl FreeTextSlot {
    pub fn answer(&self) -> &str {
        match self {
            FreeTextSlot::Unanswered => "",
            FreeTextSlot::Answering { answer }
            | FreeTextSlot::Submitting { answer }
            | FreeTextSlot::Graded { answer, .. } => answer,
        }
    }

    pub fn result(&self) -> Option<&GradingResult> {
        match self {
            FreeTextSlot::Graded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The answer box accepts input only in these states.
    pub fn is_editable(&self) -> bool {
        matches!(self, FreeTextSlot::Unanswered | FreeTextSlot::Answering { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FreeTextSlot::Submitting { .. })
    }
}

#[derive(Debug)]
pub enum QuizError {
    /// No chapter content is loaded.
    NotLoaded,
    OutOfRange(usize),
    /// Empty or whitespace-only answer; nothing was sent.
    AnswerRequired,
    /// A grading call for this item is still running.
    InFlight,
    /// The item is graded; reset it first.
    Locked,
    /// The grading call failed. The item is answerable again with its text intact.
    Grading(AppError),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::NotLoaded => write!(f, "chapter content is not loaded"),
            QuizError::OutOfRange(idx) => write!(f, "no quiz item at index {}", idx),
            QuizError::AnswerRequired => write!(f, "답변을 입력해주세요."),
            QuizError::InFlight => write!(f, "grading is already in progress"),
            QuizError::Locked => write!(f, "item is already graded"),
            QuizError::Grading(err) => write!(f, "grading failed: {}", err),
        }
    }
}

impl std::error::Error for QuizError {}

/// Free-text quiz state for one loaded chapter, one slot per item index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizBoard {
    slots: Vec<FreeTextSlot>,
}

impl QuizBoard {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![FreeTextSlot::Unanswered; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, idx: usize) -> Option<&FreeTextSlot> {
        self.slots.get(idx)
    }

    fn slot_mut(&mut self, idx: usize) -> Result<&mut FreeTextSlot, QuizError> {
        self.slots.get_mut(idx).ok_or(QuizError::OutOfRange(idx))
    }

    pub fn set_answer(&mut self, idx: usize, text: &str) -> Result<(), QuizError> {
        let slot = self.slot_mut(idx)?;
        match slot {
            FreeTextSlot::Graded { .. } => Err(QuizError::Locked),
            FreeTextSlot::Submitting { .. } => Err(QuizError::InFlight),
            _ => {
                *slot = if text.is_empty() {
                    FreeTextSlot::Unanswered
                } else {
                    FreeTextSlot::Answering {
                        answer: text.to_string(),
                    }
                };
                Ok(())
            }
        }
    }

    /// Moves the item to `Submitting` and hands back the answer to send.
    /// On any error the slot is left untouched.
    pub fn begin_submit(&mut self, idx: usize) -> Result<String, QuizError> {
        let slot = self.slot_mut(idx)?;
        let answer = match slot {
            FreeTextSlot::Unanswered => return Err(QuizError::AnswerRequired),
            FreeTextSlot::Submitting { .. } => return Err(QuizError::InFlight),
            FreeTextSlot::Graded { .. } => return Err(QuizError::Locked),
            FreeTextSlot::Answering { answer } => {
                if answer.trim().is_empty() {
                    return Err(QuizError::AnswerRequired);
                }
                answer.clone()
            }
        };

        *slot = FreeTextSlot::Submitting {
            answer: answer.clone(),
        };
        Ok(answer)
    }

    /// Stores the grading result. Ignored unless the item is submitting.
    pub fn complete(&mut self, idx: usize, result: GradingResult) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot @ FreeTextSlot::Submitting { .. }) => {
                let answer = std::mem::take(slot).answer().to_string();
                *slot = FreeTextSlot::Graded { answer, result };
                true
            }
            _ => false,
        }
    }

    /// Returns a failed submission to `Answering`, answer preserved.
    pub fn fail(&mut self, idx: usize) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot @ FreeTextSlot::Submitting { .. }) => {
                let answer = std::mem::take(slot).answer().to_string();
                *slot = FreeTextSlot::Answering { answer };
                true
            }
            _ => false,
        }
    }

    /// Clears answer and result together.
    pub fn reset(&mut self, idx: usize) -> Result<(), QuizError> {
        let slot = self.slot_mut(idx)?;
        if slot.is_submitting() {
            return Err(QuizError::InFlight);
        }
        *slot = FreeTextSlot::Unanswered;
        Ok(())
    }
}

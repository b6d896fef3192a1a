// src/chapter/mcq.rs

use std::fmt;

use crate::models::content::McqItem;

/// State of one multiple-choice item. Grading is local and synchronous.
///
/// `Unselected -> Selected -> Checked`, and `Checked { correct: false } -> Unselected`
/// via try-again. A correct answer stays checked for the life of the chapter view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum McqSlot {
    #[default]
    Unselected,
    Selected(String),
    Checked { selected: String, correct: bool },
}

impl McqSlot {
    pub fn selected(&self) -> Option<&str> {
        match self {
            McqSlot::Unselected => None,
            McqSlot::Selected(option) | McqSlot::Checked { selected: option, .. } => Some(option),
        }
    }

    /// `None` until checked.
    pub fn is_correct(&self) -> Option<bool> {
        match self {
            McqSlot::Checked { correct, .. } => Some(*correct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McqError {
    NotLoaded,
    OutOfRange(usize),
    /// `check` needs a selection first.
    NothingSelected,
    /// Already checked; only an incorrect answer can be retried.
    AlreadyChecked,
    /// `try_again` on an item that is not checked-incorrect.
    NotRetryable,
}

impl fmt::Display for McqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McqError::NotLoaded => write!(f, "chapter content is not loaded"),
            McqError::OutOfRange(idx) => write!(f, "no multiple-choice item at index {}", idx),
            McqError::NothingSelected => write!(f, "select an option first"),
            McqError::AlreadyChecked => write!(f, "item is already checked"),
            McqError::NotRetryable => write!(f, "only an incorrect answer can be retried"),
        }
    }
}

impl std::error::Error for McqError {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct McqBoard {
    slots: Vec<McqSlot>,
}

impl McqBoard {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![McqSlot::Unselected; len],
        }
    }

    pub fn slot(&self, idx: usize) -> Option<&McqSlot> {
        self.slots.get(idx)
    }

    fn slot_mut(&mut self, idx: usize) -> Result<&mut McqSlot, McqError> {
        self.slots.get_mut(idx).ok_or(McqError::OutOfRange(idx))
    }

    /// Radio-button semantics: a new selection replaces the old one.
    pub fn select(&mut self, idx: usize, option: &str) -> Result<(), McqError> {
        let slot = self.slot_mut(idx)?;
        if matches!(slot, McqSlot::Checked { .. }) {
            return Err(McqError::AlreadyChecked);
        }
        *slot = McqSlot::Selected(option.to_string());
        Ok(())
    }

    /// Compares the selection against `item.answer` by exact string equality.
    pub fn check(&mut self, idx: usize, item: &McqItem) -> Result<bool, McqError> {
        let slot = self.slot_mut(idx)?;
        let selected = match slot {
            McqSlot::Unselected => return Err(McqError::NothingSelected),
            McqSlot::Checked { .. } => return Err(McqError::AlreadyChecked),
            McqSlot::Selected(option) => std::mem::take(option),
        };

        let correct = selected == item.answer;
        *slot = McqSlot::Checked { selected, correct };
        Ok(correct)
    }

    pub fn try_again(&mut self, idx: usize) -> Result<(), McqError> {
        let slot = self.slot_mut(idx)?;
        match slot {
            McqSlot::Checked { correct: false, .. } => {
                *slot = McqSlot::Unselected;
                Ok(())
            }
            _ => Err(McqError::NotRetryable),
        }
    }

    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.is_correct() == Some(true))
            .count()
    }
}

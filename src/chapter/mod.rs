// src/chapter/mod.rs

pub mod controller;
pub mod feedback;
pub mod mcq;
pub mod navigation;
pub mod quiz;
pub mod survey;

pub use controller::{ChapterController, ChapterPhase, EnterOutcome, GradeOutcome, Tab};
pub use navigation::{ChapterLocation, NavigationError, NavigationHost, NextAction, RequestInfo};

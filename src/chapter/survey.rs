// src/chapter/survey.rs

use std::fmt;

use crate::models::preference::UserPreferenceRequest;

pub const GOAL_OPTIONS: [&str; 4] = [
    "취업/이직 준비",
    "업무 스킬 향상",
    "취미/자기계발",
    "학교 과제/연구",
];

pub const STYLE_OPTIONS: [&str; 3] = [
    "이론 중심 (원리부터 차근차근)",
    "실습 중심 (코드부터 짜보면서)",
    "균형 있게 (이론 반 실습 반)",
];

pub const DEPTH_OPTIONS: [&str; 3] = [
    "핵심만 빠르게 (Quick Overview)",
    "적당한 깊이로 (Standard)",
    "아주 상세하게 (Deep Dive)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurveyStep {
    #[default]
    Goal,
    Style,
    Depth,
}

impl SurveyStep {
    pub fn options(self) -> &'static [&'static str] {
        match self {
            SurveyStep::Goal => &GOAL_OPTIONS,
            SurveyStep::Style => &STYLE_OPTIONS,
            SurveyStep::Depth => &DEPTH_OPTIONS,
        }
    }

    /// 1-based, for "n/3" progress display.
    pub fn number(self) -> u8 {
        match self {
            SurveyStep::Goal => 1,
            SurveyStep::Style => 2,
            SurveyStep::Depth => 3,
        }
    }

    fn next(self) -> Self {
        match self {
            SurveyStep::Goal => SurveyStep::Style,
            SurveyStep::Style | SurveyStep::Depth => SurveyStep::Depth,
        }
    }

    fn prev(self) -> Self {
        match self {
            SurveyStep::Goal | SurveyStep::Style => SurveyStep::Goal,
            SurveyStep::Depth => SurveyStep::Style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    /// The overlay is not showing a form.
    NotOpen,
    UnknownOption(String),
    /// Submit needs all three answers.
    Incomplete,
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::NotOpen => write!(f, "survey is not open"),
            SurveyError::UnknownOption(opt) => write!(f, "'{}' is not one of the offered options", opt),
            SurveyError::Incomplete => write!(f, "all three questions must be answered"),
        }
    }
}

impl std::error::Error for SurveyError {}

/// The three-step forced-choice questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyForm {
    step: SurveyStep,
    learning_goal: Option<String>,
    learning_style: Option<String>,
    desired_depth: Option<String>,
}

impl SurveyForm {
    pub fn step(&self) -> SurveyStep {
        self.step
    }

    /// Records `option` for the current step. Steps 1 and 2 advance; step 3 stays put.
    pub fn choose(&mut self, option: &str) -> Result<(), SurveyError> {
        if !self.step.options().iter().any(|o| *o == option) {
            return Err(SurveyError::UnknownOption(option.to_string()));
        }

        let answer = Some(option.to_string());
        match self.step {
            SurveyStep::Goal => self.learning_goal = answer,
            SurveyStep::Style => self.learning_style = answer,
            SurveyStep::Depth => self.desired_depth = answer,
        }
        self.step = self.step.next();
        Ok(())
    }

    /// Earlier answers are kept.
    pub fn back(&mut self) {
        self.step = self.step.prev();
    }

    pub fn is_complete(&self) -> bool {
        self.learning_goal.is_some() && self.learning_style.is_some() && self.desired_depth.is_some()
    }

    pub fn to_request(&self) -> Result<UserPreferenceRequest, SurveyError> {
        match (&self.learning_goal, &self.learning_style, &self.desired_depth) {
            (Some(goal), Some(style), Some(depth)) => Ok(UserPreferenceRequest {
                learning_goal: goal.clone(),
                learning_style: style.clone(),
                desired_depth: depth.clone(),
            }),
            _ => Err(SurveyError::Incomplete),
        }
    }
}

/// What the survey overlay is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SurveyOverlay {
    #[default]
    Hidden,
    Open(SurveyForm),
    /// Preferences are being saved; the form is frozen.
    Saving(SurveyForm),
    /// Answered, but content generation is still running. Closes when it settles.
    WaitingForContent,
}

impl SurveyOverlay {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SurveyOverlay::Hidden)
    }
}

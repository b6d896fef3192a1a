// src/chapter/controller.rs

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;

use super::{
    feedback::{FeedbackError, FeedbackForm},
    mcq::{McqBoard, McqError, McqSlot},
    navigation::{
        ChapterLocation, MissingContext, NavigationError, NavigationHost, NextAction, ValidContext,
    },
    quiz::{FreeTextSlot, QuizBoard, QuizError},
    survey::{SurveyError, SurveyForm, SurveyOverlay},
};
use crate::{
    api::ContentService,
    download,
    error::AppError,
    models::{
        content::ChapterContent,
        course::Chapter,
        feedback::FeedbackResponse,
        grading::{GradeQuizRequest, GradingResult},
    },
    session::SessionContext,
};

/// Content tabs of the chapter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Concept,
    Exercise,
    Quiz,
}

/// Load state as seen by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterPhase {
    Idle,
    Loading,
    Loaded,
    /// User-facing message. Only a full reload recovers.
    Failed(String),
    NotFound(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnterOutcome {
    /// Fetched and cached.
    Loaded,
    /// Already loaded for this chapter; nothing was fetched.
    Cached,
    /// A fetch for this chapter is already running.
    InFlight,
    Failed { message: String },
    /// The learner navigated elsewhere before the response arrived; it was dropped.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GradeOutcome {
    Graded(GradingResult),
    /// The chapter changed while grading; the result was dropped.
    Discarded,
}

/// Content plus the per-item state that lives and dies with it.
#[derive(Debug)]
struct LoadedChapter {
    chapter: Chapter,
    content: ChapterContent,
    quiz: QuizBoard,
    mcq: McqBoard,
}

impl LoadedChapter {
    fn new(chapter: Chapter, content: ChapterContent) -> Self {
        let quiz = QuizBoard::new(content.advanced_learning.quizes.len());
        let mcq = McqBoard::new(content.quiz.quizes.len());
        Self {
            chapter,
            content,
            quiz,
            mcq,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Loading,
    Loaded(Box<LoadedChapter>),
    Failed(String),
    NotFound(i64),
}

#[derive(Debug)]
struct ChapterState {
    context: Option<ValidContext>,
    /// Bumped on every chapter change. Async results carry the epoch they started
    /// under and are dropped if it no longer matches.
    epoch: u64,
    phase: Phase,
    tab: Tab,
    feedback: FeedbackForm,
    survey: SurveyOverlay,
}

impl ChapterState {
    fn new() -> Self {
        Self {
            context: None,
            epoch: 0,
            phase: Phase::Idle,
            tab: Tab::Concept,
            feedback: FeedbackForm::default(),
            survey: SurveyOverlay::Hidden,
        }
    }

    fn is_current(&self, ctx: &ValidContext) -> bool {
        self.context
            .as_ref()
            .is_some_and(|c| c.course.id == ctx.course.id && c.chapter_id == ctx.chapter_id)
    }

    fn loaded(&self) -> Option<&LoadedChapter> {
        match &self.phase {
            Phase::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    fn loaded_mut(&mut self) -> Option<&mut LoadedChapter> {
        match &mut self.phase {
            Phase::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    fn current_chapter(&self) -> Option<&Chapter> {
        let ctx = self.context.as_ref()?;
        ctx.course.chapter(ctx.chapter_id)
    }

    fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Switches to a new chapter view: fresh epoch, concept tab, empty feedback form.
    fn begin_view(&mut self, ctx: ValidContext, phase: Phase) -> u64 {
        self.epoch += 1;
        self.context = Some(ctx);
        self.phase = phase;
        self.tab = Tab::Concept;
        self.feedback = FeedbackForm::default();
        self.close_waiting_survey();
        self.epoch
    }

    /// An answered survey waits only as long as something is loading.
    fn close_waiting_survey(&mut self) {
        if !self.is_loading() && self.survey == SurveyOverlay::WaitingForContent {
            self.survey = SurveyOverlay::Hidden;
        }
    }
}

/// Drives one chapter view: loading, tabs, quizzes, feedback, the survey overlay
/// and movement between chapters.
///
/// All methods take `&self`. State sits behind an async mutex that is never held
/// across a service call, so independent operations (grading two items, typing
/// while a grade is pending) overlap freely.
pub struct ChapterController {
    service: Arc<dyn ContentService>,
    session: SessionContext,
    host: Arc<dyn NavigationHost>,
    state: Mutex<ChapterState>,
}

impl ChapterController {
    pub fn new(
        service: Arc<dyn ContentService>,
        session: SessionContext,
        host: Arc<dyn NavigationHost>,
    ) -> Self {
        Self {
            service,
            session,
            host,
            state: Mutex::new(ChapterState::new()),
        }
    }

    /// Shows the chapter named by `location`, fetching its content unless it is already held.
    ///
    /// * Missing context: the host is redirected to the entry screen, nothing is fetched.
    /// * Unknown chapter: the view shows "not found", nothing is fetched.
    /// * Same chapter as the one loaded (or loading): no-op.
    /// * Anything else: one generation request; the first one of the session also opens the survey.
    pub async fn enter(&self, location: ChapterLocation) -> Result<EnterOutcome, NavigationError> {
        let ctx = match location.validate() {
            Ok(ctx) => ctx,
            Err(MissingContext) => {
                tracing::warn!("Chapter view opened without course context, redirecting to entry");
                self.host.redirect_to_entry();
                return Err(NavigationError::MissingContext);
            }
        };

        let (epoch, request, chapter) = {
            let mut state = self.state.lock().await;

            if state.is_current(&ctx) {
                match &state.phase {
                    Phase::Loaded(_) => return Ok(EnterOutcome::Cached),
                    Phase::Loading => return Ok(EnterOutcome::InFlight),
                    Phase::Failed(message) => {
                        return Ok(EnterOutcome::Failed {
                            message: message.clone(),
                        });
                    }
                    Phase::Idle | Phase::NotFound(_) => {}
                }
            }

            let chapter_id = ctx.chapter_id;
            let Some(chapter) = ctx.course.chapter(chapter_id).cloned() else {
                tracing::warn!("Chapter {} is not part of course {}", chapter_id, ctx.course.id);
                state.begin_view(ctx, Phase::NotFound(chapter_id));
                return Err(NavigationError::ChapterNotFound(chapter_id));
            };

            let request = ctx.request_info.chapter_request(&chapter);
            let epoch = state.begin_view(ctx, Phase::Loading);

            if self.session.try_open_survey() {
                tracing::info!("Opening preference survey for this session");
                state.survey = SurveyOverlay::Open(SurveyForm::default());
            }

            (epoch, request, chapter)
        };

        tracing::info!("Generating content for chapter '{}'", chapter.title);
        let result = self.service.generate_chapter_content(&request).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            tracing::debug!("Dropping content for '{}', the view has moved on", chapter.title);
            state.close_waiting_survey();
            return Ok(EnterOutcome::Superseded);
        }

        let outcome = match result {
            Ok(content) => {
                tracing::info!("Loaded chapter '{}'", chapter.title);
                state.phase = Phase::Loaded(Box::new(LoadedChapter::new(chapter, content)));
                EnterOutcome::Loaded
            }
            Err(e) => {
                tracing::error!("Failed to generate chapter '{}': {}", chapter.title, e);
                let message = e.user_message();
                state.phase = Phase::Failed(message.clone());
                EnterOutcome::Failed { message }
            }
        };

        state.close_waiting_survey();

        Ok(outcome)
    }

    /// Moves to the following chapter. `None` when there is none or a load is running.
    pub async fn go_next(&self) -> Result<Option<EnterOutcome>, NavigationError> {
        self.step(true).await
    }

    /// Moves to the preceding chapter. `None` when there is none or a load is running.
    pub async fn go_prev(&self) -> Result<Option<EnterOutcome>, NavigationError> {
        self.step(false).await
    }

    async fn step(&self, forward: bool) -> Result<Option<EnterOutcome>, NavigationError> {
        let location = {
            let state = self.state.lock().await;
            if state.is_loading() {
                return Ok(None);
            }
            let Some(ctx) = state.context.as_ref() else {
                return Ok(None);
            };
            let Some(index) = ctx.course.chapter_index(ctx.chapter_id) else {
                return Ok(None);
            };
            let target = if forward {
                index.checked_add(1)
            } else {
                index.checked_sub(1)
            };
            let Some(next) = target.and_then(|i| ctx.course.chapters.get(i)) else {
                return Ok(None);
            };

            ChapterLocation::new(ctx.course.clone(), ctx.request_info.clone(), next.chapter_id)
        };

        self.enter(location).await.map(Some)
    }

    /// Forward action to offer: the next chapter, or course completion on the last one.
    pub async fn next_action(&self) -> Option<NextAction> {
        let state = self.state.lock().await;
        let ctx = state.context.as_ref()?;
        let index = ctx.course.chapter_index(ctx.chapter_id)?;

        match ctx.course.chapters.get(index + 1) {
            Some(next) => Some(NextAction::Next(next.chapter_id)),
            None => Some(NextAction::CompleteCourse),
        }
    }

    /// Leaves the chapter flow from the last chapter. Returns `false` (and does nothing)
    /// anywhere else or while loading.
    pub async fn complete_course(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.is_loading() {
            return false;
        }
        let Some(ctx) = state.context.as_ref() else {
            return false;
        };
        let is_last = ctx
            .course
            .chapter_index(ctx.chapter_id)
            .is_some_and(|i| i + 1 == ctx.course.chapters.len());
        if !is_last {
            return false;
        }

        let course_id = ctx.course.id;
        state.epoch += 1;
        state.context = None;
        state.phase = Phase::Idle;
        state.close_waiting_survey();
        drop(state);

        tracing::info!("Course {} completed", course_id);
        self.host.course_completed(course_id);
        true
    }

    /// Refused while content is loading.
    pub async fn select_tab(&self, tab: Tab) -> bool {
        let mut state = self.state.lock().await;
        if state.is_loading() {
            return false;
        }
        state.tab = tab;
        true
    }

    pub async fn set_answer(&self, idx: usize, text: &str) -> Result<(), QuizError> {
        let mut state = self.state.lock().await;
        let loaded = state.loaded_mut().ok_or(QuizError::NotLoaded)?;
        loaded.quiz.set_answer(idx, text)
    }

    /// Sends free-text item `idx` for grading.
    ///
    /// An empty answer is rejected without a call. On failure the item becomes
    /// answerable again with its text intact.
    pub async fn submit_answer(&self, idx: usize) -> Result<GradeOutcome, QuizError> {
        let (epoch, request) = {
            let mut state = self.state.lock().await;
            let epoch = state.epoch;
            let loaded = state.loaded_mut().ok_or(QuizError::NotLoaded)?;
            let question = loaded
                .content
                .advanced_learning
                .quizes
                .get(idx)
                .ok_or(QuizError::OutOfRange(idx))?
                .quiz
                .clone();
            let answer = loaded.quiz.begin_submit(idx)?;

            let request = GradeQuizRequest {
                question,
                answer,
                chapter_title: loaded.chapter.title.clone(),
                chapter_description: loaded.chapter.description.clone(),
            };
            (epoch, request)
        };

        let result = self.service.grade_quiz(&request).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            tracing::debug!("Dropping grading result for item {}, the view has moved on", idx);
            return Ok(GradeOutcome::Discarded);
        }
        let Some(loaded) = state.loaded_mut() else {
            return Ok(GradeOutcome::Discarded);
        };

        match result {
            Ok(grading) => {
                loaded.quiz.complete(idx, grading.clone());
                Ok(GradeOutcome::Graded(grading))
            }
            Err(e) => {
                tracing::error!("Grading item {} failed: {}", idx, e);
                loaded.quiz.fail(idx);
                Err(QuizError::Grading(e))
            }
        }
    }

    /// "Answer again": clears answer and grading for `idx`.
    pub async fn reset_answer(&self, idx: usize) -> Result<(), QuizError> {
        let mut state = self.state.lock().await;
        let loaded = state.loaded_mut().ok_or(QuizError::NotLoaded)?;
        loaded.quiz.reset(idx)
    }

    pub async fn select_option(&self, idx: usize, option: &str) -> Result<(), McqError> {
        let mut state = self.state.lock().await;
        let loaded = state.loaded_mut().ok_or(McqError::NotLoaded)?;
        loaded.mcq.select(idx, option)
    }

    /// Grades multiple-choice item `idx` locally. `Ok(true)` when correct.
    pub async fn check_option(&self, idx: usize) -> Result<bool, McqError> {
        let mut state = self.state.lock().await;
        let loaded = state.loaded_mut().ok_or(McqError::NotLoaded)?;
        let item = loaded
            .content
            .quiz
            .quizes
            .get(idx)
            .ok_or(McqError::OutOfRange(idx))?;
        loaded.mcq.check(idx, item)
    }

    pub async fn retry_option(&self, idx: usize) -> Result<(), McqError> {
        let mut state = self.state.lock().await;
        let loaded = state.loaded_mut().ok_or(McqError::NotLoaded)?;
        loaded.mcq.try_again(idx)
    }

    pub async fn set_rating(&self, rating: u8) -> Result<(), FeedbackError> {
        self.state.lock().await.feedback.set_rating(rating)
    }

    pub async fn set_comment(&self, comment: &str) -> Result<(), FeedbackError> {
        self.state.lock().await.feedback.set_comment(comment)
    }

    /// Sends the chapter rating. A zero rating is rejected without a call.
    pub async fn submit_feedback(&self) -> Result<FeedbackResponse, FeedbackError> {
        let (epoch, request) = {
            let mut state = self.state.lock().await;
            let title = state
                .current_chapter()
                .map(|c| c.title.clone())
                .ok_or(FeedbackError::NotLoaded)?;
            let request = state.feedback.begin_submit(&title)?;
            (state.epoch, request)
        };

        let result = self.service.submit_feedback(&request).await;

        let mut state = self.state.lock().await;
        let current = state.epoch == epoch;
        match result {
            Ok(response) => {
                if current {
                    state.feedback.complete();
                }
                tracing::info!("Feedback saved for '{}'", request.chapter_title);
                Ok(response)
            }
            Err(e) => {
                if current {
                    state.feedback.fail();
                }
                tracing::error!("Failed to save feedback for '{}': {}", request.chapter_title, e);
                Err(FeedbackError::Submit(e))
            }
        }
    }

    pub async fn survey_choose(&self, option: &str) -> Result<(), SurveyError> {
        let mut state = self.state.lock().await;
        match &mut state.survey {
            SurveyOverlay::Open(form) => form.choose(option),
            _ => Err(SurveyError::NotOpen),
        }
    }

    pub async fn survey_back(&self) -> Result<(), SurveyError> {
        let mut state = self.state.lock().await;
        match &mut state.survey {
            SurveyOverlay::Open(form) => {
                form.back();
                Ok(())
            }
            _ => Err(SurveyError::NotOpen),
        }
    }

    /// Saves survey answers and closes the overlay.
    ///
    /// Saving is best effort: a failed save still completes the survey for the session.
    /// If content is still generating, the overlay waits for it before closing.
    pub async fn submit_survey(&self) -> Result<(), SurveyError> {
        let request = {
            let mut state = self.state.lock().await;
            let form = match &state.survey {
                SurveyOverlay::Open(form) => form.clone(),
                _ => return Err(SurveyError::NotOpen),
            };
            let request = form.to_request()?;
            state.survey = SurveyOverlay::Saving(form);
            request
        };

        if let Err(e) = self.service.save_preferences(&request).await {
            tracing::warn!("Failed to save survey preferences, continuing: {}", e);
        }
        self.session.complete_survey();

        let mut state = self.state.lock().await;
        state.survey = if state.is_loading() {
            SurveyOverlay::WaitingForContent
        } else {
            SurveyOverlay::Hidden
        };
        Ok(())
    }

    /// Downloads the loaded chapter as markdown into `dir`.
    pub async fn download(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let request = {
            let state = self.state.lock().await;
            let (Some(ctx), Some(loaded)) = (state.context.as_ref(), state.loaded()) else {
                return Err(AppError::Validation("no chapter content is loaded".to_string()));
            };
            ctx.request_info.chapter_request(&loaded.chapter)
        };

        let response = self.service.download_chapter(&request).await?;
        download::save_chapter(dir, &response).await
    }

    pub async fn phase(&self) -> ChapterPhase {
        match &self.state.lock().await.phase {
            Phase::Idle => ChapterPhase::Idle,
            Phase::Loading => ChapterPhase::Loading,
            Phase::Loaded(_) => ChapterPhase::Loaded,
            Phase::Failed(message) => ChapterPhase::Failed(message.clone()),
            Phase::NotFound(id) => ChapterPhase::NotFound(*id),
        }
    }

    pub async fn content(&self) -> Option<ChapterContent> {
        self.state.lock().await.loaded().map(|l| l.content.clone())
    }

    pub async fn current_chapter(&self) -> Option<Chapter> {
        self.state.lock().await.current_chapter().cloned()
    }

    /// `(index, total)` of the current chapter within its course, 0-based index.
    pub async fn position(&self) -> Option<(usize, usize)> {
        let state = self.state.lock().await;
        let ctx = state.context.as_ref()?;
        let index = ctx.course.chapter_index(ctx.chapter_id)?;
        Some((index, ctx.course.chapters.len()))
    }

    pub async fn active_tab(&self) -> Tab {
        self.state.lock().await.tab
    }

    pub async fn quiz_slot(&self, idx: usize) -> Option<FreeTextSlot> {
        self.state.lock().await.loaded()?.quiz.slot(idx).cloned()
    }

    pub async fn mcq_slot(&self, idx: usize) -> Option<McqSlot> {
        self.state.lock().await.loaded()?.mcq.slot(idx).cloned()
    }

    pub async fn feedback(&self) -> FeedbackForm {
        self.state.lock().await.feedback.clone()
    }

    pub async fn survey(&self) -> SurveyOverlay {
        self.state.lock().await.survey.clone()
    }
}

impl Drop for ChapterController {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if matches!(state.survey, SurveyOverlay::Open(_) | SurveyOverlay::Saving(_))
            && self.session.release_survey()
        {
            tracing::info!("Chapter view closed before the survey was answered, releasing it");
        }
    }
}

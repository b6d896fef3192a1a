// tests/common/mod.rs

#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use poppins::{
    api::ContentService,
    chapter::{ChapterController, ChapterLocation, ChapterPhase, NavigationHost, RequestInfo},
    error::AppError,
    models::{
        content::{
            AdvancedLearning, ChapterContent, ChapterRequest, DownloadResponse, FreeTextItem,
            McqItem, MultipleChoiceQuiz, Section,
        },
        course::{Chapter, Course, CourseListItem, CourseResponse, GenerateCourseRequest},
        feedback::{FeedbackRequest, FeedbackResponse},
        grading::{GradeQuizRequest, GradingResult},
        objective::{ObjectivesRequest, ObjectivesResponse},
        preference::UserPreferenceRequest,
        quiz_result::QuizResultListResponse,
    },
    session::SessionContext,
};
use tokio::sync::oneshot;

pub const TOPIC: &str = "파이썬 리스트";

pub fn chapter(id: i64, title: &str) -> Chapter {
    Chapter {
        chapter_id: id,
        title: title.to_string(),
        description: format!("{} 설명", title),
    }
}

/// Three chapters, ids 1..=3.
pub fn course() -> Course {
    Course {
        id: 42,
        topic: Some(TOPIC.to_string()),
        description: None,
        level: Some("중급".to_string()),
        chapters: vec![
            chapter(1, "리스트 기초"),
            chapter(2, "슬라이싱"),
            chapter(3, "컴프리헨션"),
        ],
    }
}

pub fn request_info() -> RequestInfo {
    RequestInfo {
        topic: TOPIC.to_string(),
        course_description: None,
    }
}

pub fn location(chapter_id: i64) -> ChapterLocation {
    ChapterLocation::new(course(), request_info(), chapter_id)
}

/// Content with two multiple-choice and two free-text items, tagged with the chapter title.
pub fn content_for(chapter_title: &str) -> ChapterContent {
    let chapter = course()
        .chapters
        .into_iter()
        .find(|c| c.title == chapter_title)
        .unwrap_or_else(|| chapter(0, chapter_title));

    ChapterContent {
        chapter,
        concept: Section {
            title: format!("{} 개념", chapter_title),
            description: "개념 설명".into(),
            contents: format!("# {}\n\n본문", chapter_title),
        },
        exercise: Section {
            title: format!("{} 실습", chapter_title),
            description: "실습 설명".into(),
            contents: "1. 리스트를 만들어 보세요.".into(),
        },
        quiz: MultipleChoiceQuiz {
            quizes: vec![
                McqItem {
                    question: "마지막 원소를 꺼내는 메서드는?".into(),
                    options: vec!["pop()".into(), "push()".into(), "peek()".into()],
                    answer: "pop()".into(),
                    explanation: "pop()은 마지막 원소를 반환합니다.".into(),
                },
                McqItem {
                    question: "빈 리스트 리터럴은?".into(),
                    options: vec!["[]".into(), "{}".into(), "()".into()],
                    answer: "[]".into(),
                    explanation: "대괄호입니다.".into(),
                },
            ],
        },
        advanced_learning: AdvancedLearning {
            quizes: vec![
                FreeTextItem {
                    quiz: format!("{}: 리스트와 튜플의 차이를 설명하세요.", chapter_title),
                },
                FreeTextItem {
                    quiz: format!("{}: 얕은 복사를 설명하세요.", chapter_title),
                },
            ],
        },
    }
}

pub fn grading(score: f64, feedback: &str) -> GradingResult {
    GradingResult {
        score,
        feedback: feedback.to_string(),
        correct_points: vec!["핵심 개념 언급".into()],
        improvements: vec!["예시 추가".into()],
    }
}

pub fn service_error(detail: &str) -> AppError {
    AppError::Service {
        status: 500,
        detail: Some(detail.to_string()),
    }
}

type Gate<T> = oneshot::Receiver<Result<T, AppError>>;

/// In-memory [`ContentService`] with a call log and per-request gates, so tests
/// decide when (and with what) each pending call resolves.
#[derive(Default)]
pub struct ScriptedService {
    calls: Mutex<Vec<String>>,
    content_gates: Mutex<HashMap<String, Gate<ChapterContent>>>,
    grade_gates: Mutex<HashMap<String, Gate<GradingResult>>>,
    failing_chapters: Mutex<HashSet<String>>,
    failing_answers: Mutex<HashSet<String>>,
    fail_feedback: AtomicBool,
    fail_preferences: AtomicBool,
    fail_delete: AtomicBool,
    fail_list: AtomicBool,
    last_grade_request: Mutex<Option<GradeQuizRequest>>,
    last_feedback: Mutex<Option<FeedbackRequest>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Holds content generation for `chapter_title` until the returned sender fires.
    pub fn gate_content(&self, chapter_title: &str) -> oneshot::Sender<Result<ChapterContent, AppError>> {
        let (tx, rx) = oneshot::channel();
        self.content_gates
            .lock()
            .unwrap()
            .insert(chapter_title.to_string(), rx);
        tx
    }

    /// Holds grading of `answer` until the returned sender fires.
    pub fn gate_grade(&self, answer: &str) -> oneshot::Sender<Result<GradingResult, AppError>> {
        let (tx, rx) = oneshot::channel();
        self.grade_gates
            .lock()
            .unwrap()
            .insert(answer.to_string(), rx);
        tx
    }

    pub fn fail_chapter(&self, chapter_title: &str) {
        self.failing_chapters
            .lock()
            .unwrap()
            .insert(chapter_title.to_string());
    }

    pub fn fail_answer(&self, answer: &str) {
        self.failing_answers
            .lock()
            .unwrap()
            .insert(answer.to_string());
    }

    pub fn set_fail_feedback(&self, fail: bool) {
        self.fail_feedback.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_preferences(&self, fail: bool) {
        self.fail_preferences.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn last_grade_request(&self) -> Option<GradeQuizRequest> {
        self.last_grade_request.lock().unwrap().clone()
    }

    pub fn last_feedback(&self) -> Option<FeedbackRequest> {
        self.last_feedback.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentService for ScriptedService {
    async fn generate_objectives(&self, req: &ObjectivesRequest) -> Result<ObjectivesResponse, AppError> {
        self.record(format!("generate-objectives:{}", req.topic));
        Ok(ObjectivesResponse {
            objectives: vec![poppins::models::objective::ObjectiveItem {
                id: 1,
                title: "실무 활용".into(),
                description: "업무 자동화에 리스트 활용".into(),
                target_audience: "직장인".into(),
            }],
        })
    }

    async fn generate_course(&self, req: &GenerateCourseRequest) -> Result<CourseResponse, AppError> {
        self.record(format!(
            "generate-course:{}",
            req.selected_objective.clone().unwrap_or_default()
        ));
        Ok(CourseResponse { course: course() })
    }

    async fn generate_chapter_content(&self, req: &ChapterRequest) -> Result<ChapterContent, AppError> {
        self.record(format!("generate-chapter-content:{}", req.chapter_title));

        let gate = self.content_gates.lock().unwrap().remove(&req.chapter_title);
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(AppError::Network("gate dropped".into())));
        }

        if self.failing_chapters.lock().unwrap().contains(&req.chapter_title) {
            return Err(service_error("챕터 콘텐츠 생성 실패 - 모델 응답 없음"));
        }
        Ok(content_for(&req.chapter_title))
    }

    async fn grade_quiz(&self, req: &GradeQuizRequest) -> Result<GradingResult, AppError> {
        self.record(format!("grade-quiz:{}", req.answer));
        *self.last_grade_request.lock().unwrap() = Some(req.clone());

        let gate = self.grade_gates.lock().unwrap().remove(&req.answer);
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(AppError::Network("gate dropped".into())));
        }

        if self.failing_answers.lock().unwrap().contains(&req.answer) {
            return Err(service_error("퀴즈 채점 실패"));
        }
        Ok(grading(80.0, &format!("graded: {}", req.answer)))
    }

    async fn download_chapter(&self, req: &ChapterRequest) -> Result<DownloadResponse, AppError> {
        self.record(format!("download-chapter:{}", req.chapter_title));
        Ok(DownloadResponse {
            filename: format!("{}.md", req.chapter_title),
            content: format!("# {}\n", req.chapter_title),
        })
    }

    async fn submit_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, AppError> {
        self.record(format!("feedback:{}", req.chapter_title));
        *self.last_feedback.lock().unwrap() = Some(req.clone());

        if self.fail_feedback.load(Ordering::SeqCst) {
            return Err(service_error("피드백 저장 실패"));
        }
        Ok(FeedbackResponse {
            status: "success".into(),
            message: "Feedback saved".into(),
        })
    }

    async fn save_preferences(&self, _req: &UserPreferenceRequest) -> Result<(), AppError> {
        self.record("user/preferences".to_string());
        if self.fail_preferences.load(Ordering::SeqCst) {
            return Err(service_error("Failed to save preferences"));
        }
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<CourseListItem>, AppError> {
        self.record("courses".to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(AppError::Network("connection refused".into()));
        }
        Ok(vec![
            list_item(1, "파이썬 리스트", 100),
            list_item(2, "러스트 소유권", 40),
            list_item(3, "SQL 조인", 0),
        ])
    }

    async fn get_course(&self, course_id: i64) -> Result<CourseResponse, AppError> {
        self.record(format!("course:{}", course_id));
        Ok(CourseResponse { course: course() })
    }

    async fn delete_course(&self, course_id: i64) -> Result<(), AppError> {
        self.record(format!("delete-course:{}", course_id));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(service_error("Course not found"));
        }
        Ok(())
    }

    async fn list_quiz_results(&self) -> Result<QuizResultListResponse, AppError> {
        self.record("quiz-results".to_string());
        Ok(QuizResultListResponse { results: vec![] })
    }

    async fn check_health(&self) -> bool {
        true
    }

    async fn config_status(&self) -> Result<BTreeMap<String, serde_json::Value>, AppError> {
        Ok(BTreeMap::new())
    }
}

pub fn list_item(id: i64, topic: &str, progress: u32) -> CourseListItem {
    CourseListItem {
        id,
        topic: topic.to_string(),
        description: format!("{} 과정", topic),
        level: "중급".into(),
        created_at: "2025-11-26T10:00:00".into(),
        chapter_count: 3,
        completed_chapters: progress * 3 / 100,
        progress,
    }
}

/// Records host side effects.
#[derive(Default)]
pub struct RecordingHost {
    pub redirects: AtomicUsize,
    pub completed: Mutex<Vec<i64>>,
}

impl NavigationHost for RecordingHost {
    fn redirect_to_entry(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }

    fn course_completed(&self, course_id: i64) {
        self.completed.lock().unwrap().push(course_id);
    }
}

pub fn controller_with(
    service: Arc<ScriptedService>,
    session: SessionContext,
) -> (ChapterController, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::default());
    let controller = ChapterController::new(service, session, host.clone());
    (controller, host)
}

/// Yields until the controller reports `phase`.
pub async fn wait_for_phase(controller: &ChapterController, phase: ChapterPhase) {
    for _ in 0..1000 {
        if controller.phase().await == phase {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("controller never reached {:?}", phase);
}

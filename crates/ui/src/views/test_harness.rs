use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use reading_core::model::{
    AnswerSet, Question, QuestionId, QuestionMeta, ReadingTest, SessionId, SubmissionResult,
};
use reading_core::time::fixed_now;
use services::{
    AppServices, BackendError, Clock, CompletedAttempt, ExamBackend, SessionController,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{ReadingTestView, ResultView};

pub const TEST_MINUTES: u32 = 60;

#[derive(Default)]
pub struct FakeBackend {
    pub fail_submit: AtomicBool,
}

fn question(id: u64, tag: &str, text: &str) -> Question {
    let meta = QuestionMeta {
        id: QuestionId::new(id),
        number: u32::try_from(id).unwrap(),
        text: text.to_string(),
        marks: 1,
    };
    let options = [
        Some("Merchants".to_string()),
        Some("Monks".to_string()),
        Some("Engineers".to_string()),
        None,
    ];
    Question::from_parts(meta, tag, options).unwrap()
}

#[async_trait]
impl ExamBackend for FakeBackend {
    async fn fetch_test(&self) -> Result<ReadingTest, BackendError> {
        Ok(ReadingTest::new(
            Some(1),
            "The Grand Canal",
            "The canal was dug over four centuries.\n\nIt still carries freight today.",
            vec![
                question(1, "MCQ", "Who first planned the canal?"),
                question(2, "TRUE_FALSE", "The canal is no longer in use."),
                question(3, "TEXT", "Summarise the passage in one sentence."),
                question(4, "DIAGRAM", "Label the lock gates."),
            ],
        ))
    }

    async fn start_session(&self) -> Result<SessionId, BackendError> {
        SessionId::new("ui-session").ok_or(BackendError::MissingSessionId)
    }

    async fn end_session(&self, _session_id: &SessionId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn submit(
        &self,
        _session_id: &SessionId,
        answers: &AnswerSet,
    ) -> Result<SubmissionResult, BackendError> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(BackendError::MissingSessionId);
        }
        Ok(SubmissionResult::new(1, 4, answers.clone(), AnswerSet::new()))
    }
}

struct TestApp {
    services: AppServices,
    // Handed to the view instead of a fresh attempt, so tests can pre-drive it.
    preset: Option<Arc<SessionController>>,
}

impl UiApp for TestApp {
    fn new_attempt(&self) -> Arc<SessionController> {
        self.preset
            .clone()
            .unwrap_or_else(|| self.services.new_attempt())
    }

    fn test_minutes(&self) -> u32 {
        self.services.test_minutes()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Test,
    Result,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    report: Option<CompletedAttempt>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let report = props.report.clone();
    use_context_provider(move || {
        let context = build_app_context(&app);
        if let Some(attempt) = report {
            context.store_report(attempt);
        }
        context
    });
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Test => rsx! { ReadingTestView {} },
        ViewKind::Result => rsx! { ResultView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn app_services(backend: Arc<FakeBackend>) -> AppServices {
    AppServices::new(
        backend,
        &Storage::in_memory(),
        Clock::fixed(fixed_now()),
        TEST_MINUTES,
    )
}

pub fn setup_view_harness(
    view: ViewKind,
    services: AppServices,
    preset: Option<Arc<SessionController>>,
    report: Option<CompletedAttempt>,
) -> ViewHarness {
    let app = Arc::new(TestApp { services, preset });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, report });
    ViewHarness { dom }
}

use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{QuizRules, QuizSet};
use quiz_core::time::fixed_clock;
use services::{AppServices, QuizController, QuizObserver, SettingsService};
use storage::questions::{
    DEFAULT_QUESTIONS_JSON, InMemoryQuestionSource, QuestionSource, parse_quiz_set,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizScreen;

struct TestApp {
    services: AppServices,
    resume: bool,
}

impl UiApp for TestApp {
    fn resume_on_launch(&self) -> bool {
        self.resume
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }

    fn question_source(&self) -> Arc<dyn QuestionSource> {
        self.services.question_source()
    }

    fn new_controller(&self, observer: Arc<dyn QuizObserver>) -> QuizController {
        self.services.new_controller(observer)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizScreen {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the load resource and the event pump have caught up.
    pub async fn settle(&mut self) {
        for _ in 0..8 {
            self.drive_async().await;
        }
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

pub fn bundled_questions() -> QuizSet {
    parse_quiz_set(DEFAULT_QUESTIONS_JSON).expect("bundled questions parse")
}

pub fn setup_view_harness(questions: QuizSet) -> ViewHarness {
    setup_view_harness_with_storage(Storage::in_memory(), questions, false)
}

pub fn setup_view_harness_with_storage(
    storage: Storage,
    questions: QuizSet,
    resume: bool,
) -> ViewHarness {
    let services = AppServices::new(
        &storage,
        Arc::new(InMemoryQuestionSource::new(questions)),
        QuizRules::default(),
        fixed_clock(),
    );
    let app = Arc::new(TestApp { services, resume });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app });

    ViewHarness { dom, storage }
}

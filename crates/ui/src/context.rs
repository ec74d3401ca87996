use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::{QuizController, QuizObserver, SettingsService};
use storage::questions::QuestionSource;

pub trait UiApp: Send + Sync {
    fn resume_on_launch(&self) -> bool;

    fn settings(&self) -> Arc<SettingsService>;
    fn question_source(&self) -> Arc<dyn QuestionSource>;
    fn new_controller(&self, observer: Arc<dyn QuizObserver>) -> QuizController;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    resume_on_launch_configured: bool,
    resume_on_launch_once: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let resume_on_launch_configured = app.resume_on_launch();
        Self {
            app: Arc::clone(app),
            resume_on_launch_configured,
            resume_on_launch_once: Arc::new(AtomicBool::new(resume_on_launch_configured)),
        }
    }

    /// True only for the first load after launch, and only if resuming was requested.
    #[must_use]
    pub fn take_resume_on_launch(&self) -> bool {
        self.resume_on_launch_once.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn resume_on_launch_configured(&self) -> bool {
        self.resume_on_launch_configured
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        self.app.settings()
    }

    #[must_use]
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        self.app.question_source()
    }

    #[must_use]
    pub fn new_controller(&self, observer: Arc<dyn QuizObserver>) -> QuizController {
        self.app.new_controller(observer)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

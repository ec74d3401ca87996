use std::sync::Arc;

use quiz_core::model::QuizRules;
use storage::questions::QuestionSource;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quiz::{QuizController, QuizObserver};
use crate::settings_service::SettingsService;

/// Assembles app-facing services around one storage backend and one question source.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    rules: QuizRules,
    questions: Arc<dyn QuestionSource>,
    settings: Arc<SettingsService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    #[must_use]
    pub fn new(
        storage: &Storage,
        questions: Arc<dyn QuestionSource>,
        rules: QuizRules,
        clock: Clock,
    ) -> Self {
        Self {
            clock,
            rules,
            questions,
            settings: Arc::new(SettingsService::new(Arc::clone(&storage.settings))),
            progress: Arc::new(ProgressService::new(Arc::clone(&storage.progress))),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions: Arc<dyn QuestionSource>,
        rules: QuizRules,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, questions, rules, clock))
    }

    /// Services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory(questions: Arc<dyn QuestionSource>, rules: QuizRules, clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), questions, rules, clock)
    }

    /// A controller reporting to `observer`. Nothing is loaded yet; call
    /// `QuizController::load` with `question_source()`.
    #[must_use]
    pub fn new_controller(&self, observer: Arc<dyn QuizObserver>) -> QuizController {
        QuizController::new(
            observer,
            self.progress.as_ref().clone(),
            self.rules,
            self.clock,
        )
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    #[must_use]
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

use std::sync::{Arc, Weak};

use quiz_core::Clock;
use quiz_core::model::{
    AdvanceOutcome, AnswerResolution, IgnoreReason, Progress, QuizRules, QuizSession, QuizSet,
    QuizSummary, SelectOutcome, SessionSnapshot, TickOutcome,
};
use storage::questions::QuestionSource;
use tokio::sync::Mutex;
use tokio::time::Interval;

use crate::error::QuizControllerError;
use crate::progress_service::ProgressService;
use crate::quiz::countdown::{Countdown, TICK_PERIOD, tick_interval};
use crate::quiz::events::{PresentedQuestion, ProgressUpdate, QuizEvent, QuizObserver};

/// Message shown to the player when the question set cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load questions. Please refresh the page.";

#[derive(Default)]
struct ControllerState {
    session: Option<QuizSession>,
    countdown: Countdown,
}

struct Shared {
    state: Mutex<ControllerState>,
    observer: Arc<dyn QuizObserver>,
    progress: ProgressService,
    rules: QuizRules,
    clock: Clock,
}

/// Drives one quiz session and its countdown.
///
/// The controller owns the only countdown task for its session. Every
/// transition that leaves a question (selection, timeout, advance, restart)
/// cancels the outstanding task before anything else happens, and ticks from
/// a cancelled task are rejected by generation. View updates go out through
/// the `QuizObserver`; the view talks back only through `select_answer`,
/// `advance` and `restart`.
///
/// Cloning is cheap and clones drive the same session.
#[derive(Clone)]
pub struct QuizController {
    shared: Arc<Shared>,
}

impl QuizController {
    #[must_use]
    pub fn new(
        observer: Arc<dyn QuizObserver>,
        progress: ProgressService,
        rules: QuizRules,
        clock: Clock,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControllerState::default()),
                observer,
                progress,
                rules,
                clock,
            }),
        }
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.shared.rules
    }

    /// Load a question set from `source` and start (or resume) the quiz.
    ///
    /// With `resume`, a saved progress snapshot is picked up if one exists.
    /// Any failure is also reported to the observer as `LoadFailed`; there is
    /// no retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizControllerError::Load` if the source is unreachable or
    /// malformed and `QuizControllerError::Quiz` if it holds no questions.
    pub async fn load(
        &self,
        source: &dyn QuestionSource,
        resume: bool,
    ) -> Result<SessionSnapshot, QuizControllerError> {
        let result = match source.load().await {
            Ok(questions) => {
                let saved = if resume {
                    self.shared.progress.load().await
                } else {
                    None
                };
                match saved {
                    Some(progress) => self.resume(questions, progress).await,
                    None => self.start(questions).await,
                }
            }
            Err(err) => Err(err.into()),
        };

        if let Err(err) = &result {
            tracing::error!(%err, "failed to load question set");
            self.shared.notify(QuizEvent::LoadFailed {
                message: LOAD_FAILURE_MESSAGE.to_string(),
            });
        }
        result
    }

    /// Start a fresh quiz at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizControllerError::Quiz` if `questions` is empty.
    pub async fn start(&self, questions: QuizSet) -> Result<SessionSnapshot, QuizControllerError> {
        let session = QuizSession::start(questions, self.shared.rules, self.shared.clock.now())?;
        Ok(self.shared.install(session).await)
    }

    /// Continue from a saved snapshot; see `QuizSession::resume`.
    ///
    /// # Errors
    ///
    /// Returns `QuizControllerError::Quiz` if `questions` is empty.
    pub async fn resume(
        &self,
        questions: QuizSet,
        progress: Progress,
    ) -> Result<SessionSnapshot, QuizControllerError> {
        let session = QuizSession::resume(
            questions,
            self.shared.rules,
            progress,
            self.shared.clock.now(),
        )?;
        Ok(self.shared.install(session).await)
    }

    /// Answer the current question. A no-op once it is resolved.
    pub async fn select_answer(&self, option: usize) -> SelectOutcome {
        let mut guard = self.shared.state.lock().await;
        let state = &mut *guard;
        let Some(session) = state.session.as_mut() else {
            tracing::debug!(option, "answer ignored: no session");
            return SelectOutcome::Ignored(IgnoreReason::NotStarted);
        };

        let outcome = session.select_answer(option);
        match outcome {
            SelectOutcome::Resolved(resolution) => {
                state.countdown.cancel();
                tracing::info!(
                    question = resolution.question_index,
                    option,
                    correct = resolution.correct,
                    "answer selected"
                );
                self.shared.publish_resolution(session, resolution).await;
            }
            SelectOutcome::Ignored(reason) => {
                tracing::debug!(?reason, option, "answer ignored");
            }
        }
        outcome
    }

    /// Resolve the current question as timed out. Never scores.
    ///
    /// The countdown calls this path itself when it reaches zero.
    pub async fn timeout(&self) -> SelectOutcome {
        let mut guard = self.shared.state.lock().await;
        let state = &mut *guard;
        let Some(session) = state.session.as_mut() else {
            return SelectOutcome::Ignored(IgnoreReason::NotStarted);
        };

        let outcome = session.timeout();
        match outcome {
            SelectOutcome::Resolved(resolution) => {
                state.countdown.cancel();
                tracing::info!(question = resolution.question_index, "question timed out");
                self.shared.notify(QuizEvent::TimerTick { remaining_secs: 0 });
                self.shared.publish_resolution(session, resolution).await;
            }
            SelectOutcome::Ignored(reason) => {
                tracing::debug!(?reason, "timeout ignored");
            }
        }
        outcome
    }

    /// Leave a resolved question for the next one, or finish the quiz.
    pub async fn advance(&self) -> AdvanceOutcome {
        let mut guard = self.shared.state.lock().await;
        let state = &mut *guard;
        let outcome = match state.session.as_mut() {
            Some(session) => session.advance(self.shared.clock.now()),
            None => AdvanceOutcome::Ignored(IgnoreReason::NotStarted),
        };

        match outcome {
            AdvanceOutcome::NextQuestion { index } => {
                tracing::debug!(question = index, "advanced");
                self.shared.enter_question(state);
            }
            AdvanceOutcome::Completed(summary) => {
                state.countdown.cancel();
                self.shared.publish_completion(summary).await;
            }
            AdvanceOutcome::Ignored(reason) => {
                tracing::debug!(?reason, "advance ignored");
            }
        }
        outcome
    }

    /// Reset every counter and re-enter the first question, from any state.
    ///
    /// Returns `None` when no question set has been loaded yet.
    pub async fn restart(&self) -> Option<SessionSnapshot> {
        let mut guard = self.shared.state.lock().await;
        let state = &mut *guard;
        state.countdown.cancel();
        let Some(session) = state.session.as_mut() else {
            tracing::debug!("restart ignored: no session");
            return None;
        };

        session.restart(self.shared.clock.now());
        let snapshot = session.snapshot();
        tracing::info!(questions = snapshot.total, "quiz restarted");
        self.shared.enter_question(state);
        self.shared.progress.clear().await;
        Some(snapshot)
    }

    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        let state = self.shared.state.lock().await;
        state.session.as_ref().map(QuizSession::snapshot)
    }

    pub async fn summary(&self) -> Option<QuizSummary> {
        let state = self.shared.state.lock().await;
        state.session.as_ref().and_then(QuizSession::summary)
    }

    pub async fn current_question(&self) -> Option<PresentedQuestion> {
        let state = self.shared.state.lock().await;
        let session = state.session.as_ref()?;
        let question = session.current_question()?;
        Some(PresentedQuestion::new(
            session.current_index(),
            session.questions().len(),
            question,
            session.rules().time_limit_secs(),
        ))
    }

    /// Whether a countdown task is outstanding.
    pub async fn countdown_running(&self) -> bool {
        self.shared.state.lock().await.countdown.is_armed()
    }

    /// Stop the countdown, e.g. when the view goes away. State is kept.
    pub async fn shutdown(&self) {
        self.shared.state.lock().await.countdown.cancel();
    }
}

impl Shared {
    fn notify(&self, event: QuizEvent) {
        self.observer.notify(&event);
    }

    async fn install(self: &Arc<Self>, session: QuizSession) -> SessionSnapshot {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        state.countdown.cancel();

        let snapshot = session.snapshot();
        let finished = session.summary();
        state.session = Some(session);
        tracing::info!(
            questions = snapshot.total,
            question = snapshot.current_index,
            "quiz started"
        );

        match finished {
            Some(summary) => {
                self.notify(QuizEvent::ProgressChanged(progress_update(&snapshot)));
                self.publish_completion(summary).await;
            }
            None => self.enter_question(state),
        }
        snapshot
    }

    /// Show the current question and arm a fresh countdown for it.
    fn enter_question(self: &Arc<Self>, state: &mut ControllerState) {
        let Some(session) = state.session.as_ref() else {
            return;
        };
        let Some(question) = session.current_question() else {
            return;
        };
        let snapshot = session.snapshot();

        self.notify(QuizEvent::QuestionShown(PresentedQuestion::new(
            snapshot.current_index,
            snapshot.total,
            question,
            session.rules().time_limit_secs(),
        )));
        self.notify(QuizEvent::ProgressChanged(progress_update(&snapshot)));
        self.notify(QuizEvent::TimerTick {
            remaining_secs: snapshot.remaining_secs,
        });

        let weak = Arc::downgrade(self);
        let interval = tick_interval(TICK_PERIOD);
        let generation = state
            .countdown
            .arm(move |generation| run_countdown(weak, generation, interval));
        tracing::debug!(question = snapshot.current_index, generation, "countdown armed");
    }

    /// Apply one countdown tick. Returns whether the countdown should keep going.
    async fn tick(&self, generation: u64) -> bool {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        if !state.countdown.is_current(generation) {
            tracing::debug!(generation, "stale countdown tick ignored");
            return false;
        }
        let Some(session) = state.session.as_mut() else {
            state.countdown.disarm();
            return false;
        };

        match session.tick() {
            TickOutcome::Remaining(remaining_secs) => {
                self.notify(QuizEvent::TimerTick { remaining_secs });
                true
            }
            TickOutcome::Expired(resolution) => {
                state.countdown.disarm();
                tracing::info!(question = resolution.question_index, "question timed out");
                self.notify(QuizEvent::TimerTick { remaining_secs: 0 });
                self.publish_resolution(session, resolution).await;
                false
            }
            TickOutcome::Ignored(reason) => {
                tracing::debug!(?reason, "countdown tick ignored");
                state.countdown.disarm();
                false
            }
        }
    }

    async fn publish_resolution(&self, session: &QuizSession, resolution: AnswerResolution) {
        self.notify(QuizEvent::AnswerResolved(resolution));
        self.notify(QuizEvent::ProgressChanged(progress_update(
            &session.snapshot(),
        )));
        self.progress.save(&session.progress()).await;
    }

    async fn publish_completion(&self, summary: QuizSummary) {
        tracing::info!(
            score = summary.score(),
            correct = summary.correct_count(),
            total = summary.total(),
            percentage = summary.percentage(),
            "quiz completed"
        );
        self.notify(QuizEvent::Completed(summary));
        self.progress.clear().await;
    }
}

async fn run_countdown(shared: Weak<Shared>, generation: u64, mut interval: Interval) {
    loop {
        interval.tick().await;
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if !shared.tick(generation).await {
            return;
        }
    }
}

fn progress_update(snapshot: &SessionSnapshot) -> ProgressUpdate {
    ProgressUpdate {
        index: snapshot.current_index,
        total: snapshot.total,
        score: snapshot.score,
    }
}

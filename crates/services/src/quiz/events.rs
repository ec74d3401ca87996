use std::sync::Mutex;

use quiz_core::model::{AnswerResolution, LOW_TIME_SECS, Question, QuizSummary};
use tokio::sync::mpsc;

/// Question as handed to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub time_limit_secs: u32,
}

impl PresentedQuestion {
    #[must_use]
    pub fn new(index: usize, total: usize, question: &Question, time_limit_secs: u32) -> Self {
        Self {
            index,
            total,
            prompt: question.prompt().to_string(),
            options: question.options().to_vec(),
            time_limit_secs,
        }
    }
}

/// Position and running score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub index: usize,
    pub total: usize,
    pub score: u32,
}

impl ProgressUpdate {
    /// Share of the quiz reached, counting the question on screen.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let reached = (self.index + 1).min(self.total);
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Question {} of {}", (self.index + 1).min(self.total), self.total)
    }
}

/// One-way notification from the controller to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    QuestionShown(PresentedQuestion),
    TimerTick { remaining_secs: u32 },
    AnswerResolved(AnswerResolution),
    ProgressChanged(ProgressUpdate),
    Completed(QuizSummary),
    LoadFailed { message: String },
}

/// Receives controller events.
///
/// Called while the controller holds its session lock: implementations must
/// not call back into the controller synchronously.
pub trait QuizObserver: Send + Sync {
    fn notify(&self, event: &QuizEvent);
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl QuizObserver for NullObserver {
    fn notify(&self, _event: &QuizEvent) {}
}

/// Forwards events over an unbounded channel, e.g. onto a UI render loop.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<QuizEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<QuizEvent>) -> Self {
        Self { tx }
    }

    /// Observer plus the receiving end of its channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<QuizEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl QuizObserver for ChannelObserver {
    fn notify(&self, event: &QuizEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::debug!("quiz event dropped: receiver closed");
        }
    }
}

/// Render surface driven by the controller.
pub trait QuizView {
    fn render_question(&mut self, question: &PresentedQuestion);
    /// Mark the picked option and, when the pick was wrong or missing, the
    /// correct one.
    fn mark_answer(&mut self, resolution: &AnswerResolution);
    fn show_time(&mut self, remaining_secs: u32, low: bool);
    fn show_progress(&mut self, progress: &ProgressUpdate);
    fn show_summary(&mut self, summary: &QuizSummary);
    fn show_error(&mut self, message: &str);
}

/// Translate one event into the matching view call.
pub fn apply_event<V: QuizView + ?Sized>(view: &mut V, event: &QuizEvent) {
    match event {
        QuizEvent::QuestionShown(question) => view.render_question(question),
        QuizEvent::TimerTick { remaining_secs } => {
            view.show_time(*remaining_secs, *remaining_secs <= LOW_TIME_SECS);
        }
        QuizEvent::AnswerResolved(resolution) => view.mark_answer(resolution),
        QuizEvent::ProgressChanged(progress) => view.show_progress(progress),
        QuizEvent::Completed(summary) => view.show_summary(summary),
        QuizEvent::LoadFailed { message } => view.show_error(message),
    }
}

/// Adapts a `QuizView` into a `QuizObserver`.
pub struct ViewAdapter<V> {
    view: Mutex<V>,
}

impl<V: QuizView> ViewAdapter<V> {
    pub fn new(view: V) -> Self {
        Self {
            view: Mutex::new(view),
        }
    }

    /// Run `f` against the wrapped view.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.view.lock().ok().map(|guard| f(&guard))
    }
}

impl<V: QuizView + Send> QuizObserver for ViewAdapter<V> {
    fn notify(&self, event: &QuizEvent) {
        match self.view.lock() {
            Ok(mut view) => apply_event(&mut *view, event),
            Err(err) => tracing::warn!(%err, "quiz view poisoned; event dropped"),
        }
    }
}

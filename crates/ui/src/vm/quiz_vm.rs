use quiz_core::model::{AnswerResolution, QuizSummary};
use services::{PresentedQuestion, ProgressUpdate, QuizEvent, QuizView, quiz::apply_event};

use crate::vm::time_fmt::{format_elapsed, format_remaining};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub mark: OptionMark,
    pub disabled: bool,
}

impl OptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match (self.mark, self.disabled) {
            (OptionMark::Correct, _) => "option-btn correct disabled",
            (OptionMark::Incorrect, _) => "option-btn incorrect disabled",
            (OptionMark::Neutral, true) => "option-btn disabled",
            (OptionMark::Neutral, false) => "option-btn",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: &'static str,
    pub correct: bool,
}

impl FeedbackVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "alert alert-success"
        } else {
            "alert alert-danger"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub score: u32,
    pub correct_count: u32,
    pub total: usize,
    pub percentage_label: String,
    pub title: &'static str,
    pub message: &'static str,
    pub elapsed_label: String,
}

impl From<&QuizSummary> for SummaryVm {
    fn from(summary: &QuizSummary) -> Self {
        let band = summary.band();
        Self {
            score: summary.score(),
            correct_count: summary.correct_count(),
            total: summary.total(),
            percentage_label: format!("{}%", summary.percentage()),
            title: band.title(),
            message: band.message(),
            elapsed_label: format_elapsed(summary.elapsed()),
        }
    }
}

/// Everything the quiz screen renders, folded from controller events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    prompt: Option<String>,
    options: Vec<OptionVm>,
    is_last: bool,
    feedback: Option<FeedbackVm>,
    remaining_secs: u32,
    timer_low: bool,
    progress: Option<ProgressUpdate>,
    summary: Option<SummaryVm>,
    error: Option<String>,
}

impl Default for QuizScreenVm {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizScreenVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: None,
            options: Vec::new(),
            is_last: false,
            feedback: None,
            remaining_secs: 0,
            timer_low: false,
            progress: None,
            summary: None,
            error: None,
        }
    }

    pub fn apply(&mut self, event: &QuizEvent) {
        apply_event(self, event);
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[OptionVm] {
        &self.options
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        self.feedback
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SummaryVm> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The next button only shows once the question on screen is resolved.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.feedback.is_some() && self.summary.is_none()
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last {
            "See Results"
        } else {
            "Next Question"
        }
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_remaining(self.remaining_secs)
    }

    #[must_use]
    pub fn timer_class(&self) -> &'static str {
        if self.timer_low {
            "timer timer--low"
        } else {
            "timer"
        }
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        self.progress
            .map(|progress| progress.label())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        self.progress.map_or(0, |progress| progress.percent())
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.progress.map_or(0, |progress| progress.score))
    }
}

impl QuizView for QuizScreenVm {
    fn render_question(&mut self, question: &PresentedQuestion) {
        self.prompt = Some(question.prompt.clone());
        self.options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| OptionVm {
                index,
                label: label.clone(),
                mark: OptionMark::Neutral,
                disabled: false,
            })
            .collect();
        self.is_last = question.index + 1 == question.total;
        self.feedback = None;
        self.summary = None;
        self.error = None;
    }

    fn mark_answer(&mut self, resolution: &AnswerResolution) {
        for option in &mut self.options {
            option.disabled = true;
            option.mark = if option.index == resolution.correct_option {
                OptionMark::Correct
            } else if Some(option.index) == resolution.selected {
                OptionMark::Incorrect
            } else {
                OptionMark::Neutral
            };
        }
        self.feedback = Some(FeedbackVm {
            message: resolution.message(),
            correct: resolution.correct,
        });
    }

    fn show_time(&mut self, remaining_secs: u32, low: bool) {
        self.remaining_secs = remaining_secs;
        self.timer_low = low;
    }

    fn show_progress(&mut self, progress: &ProgressUpdate) {
        self.progress = Some(*progress);
    }

    fn show_summary(&mut self, summary: &QuizSummary) {
        self.summary = Some(SummaryVm::from(summary));
        self.prompt = None;
        self.options.clear();
        self.feedback = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

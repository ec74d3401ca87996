use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    progress::Progress, question::Question, quiz_set::QuizSet, rules::QuizRules,
    summary::QuizSummary,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question set is empty")]
    EmptyQuestionSet,

    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Where the session is in the question lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A question is on screen and the countdown is running.
    Unanswered,
    /// The current question was answered or timed out; waiting for `advance`.
    Resolved,
    /// Every question has been resolved.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionReason {
    Selected,
    TimeExpired,
}

/// How a question was resolved, plus the running totals after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResolution {
    pub question_index: usize,
    pub selected: Option<usize>,
    pub correct_option: usize,
    pub correct: bool,
    pub reason: ResolutionReason,
    pub score: u32,
    pub correct_count: u32,
}

impl AnswerResolution {
    /// Short feedback line for the player.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match (self.reason, self.correct) {
            (ResolutionReason::TimeExpired, _) => "Time's up!",
            (ResolutionReason::Selected, true) => "Correct!",
            (ResolutionReason::Selected, false) => "Incorrect!",
        }
    }
}

/// Why an operation did not change the session.
///
/// These are caller contract violations; the session treats them as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No session has been started (still loading, or the load failed).
    NotStarted,
    AlreadyResolved,
    NotResolved,
    Completed,
    OptionOutOfRange { option: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Resolved(AnswerResolution),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Remaining(u32),
    Expired(AnswerResolution),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion { index: usize },
    Completed(QuizSummary),
    Ignored(IgnoreReason),
}

/// Read-only copy of the session counters for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub total: usize,
    pub score: u32,
    pub correct_count: u32,
    pub phase: SessionPhase,
    pub remaining_secs: u32,
}

impl SessionSnapshot {
    #[must_use]
    pub fn answered(&self) -> bool {
        !matches!(self.phase, SessionPhase::Unanswered)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Question/answer/timer state machine for one quiz run.
///
/// Pure state: the session never schedules anything itself. Whoever owns it
/// drives the countdown by calling `tick` once per second while the phase is
/// `Unanswered`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: QuizSet,
    rules: QuizRules,
    current: usize,
    score: u32,
    correct_count: u32,
    phase: SessionPhase,
    remaining_secs: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Begin a quiz at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestionSet` if `questions` is empty.
    pub fn start(
        questions: QuizSet,
        rules: QuizRules,
        now: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        Ok(Self {
            questions,
            rules,
            current: 0,
            score: 0,
            correct_count: 0,
            phase: SessionPhase::Unanswered,
            remaining_secs: rules.time_limit_secs(),
            started_at: now,
            completed_at: None,
        })
    }

    /// Continue a quiz from a saved snapshot.
    ///
    /// The snapshot names the last resolved question, so play resumes at the
    /// question after it. A snapshot that does not fit `questions` or `rules`
    /// is discarded and the quiz starts fresh.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyQuestionSet` if `questions` is empty.
    pub fn resume(
        questions: QuizSet,
        rules: QuizRules,
        progress: Progress,
        now: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let mut session = Self::start(questions, rules, now)?;
        if !progress.is_consistent_with(session.questions.len(), rules.points_per_correct()) {
            return Ok(session);
        }

        session.current = progress.current_index + 1;
        session.score = progress.score;
        session.correct_count = progress.correct_count;
        if session.current >= session.questions.len() {
            session.phase = SessionPhase::Completed;
            session.completed_at = Some(now);
        }
        Ok(session)
    }

    #[must_use]
    pub fn questions(&self) -> &QuizSet {
        &self.questions
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed)
    }

    /// The question on screen, or `None` once the quiz is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current,
            total: self.questions.len(),
            score: self.score,
            correct_count: self.correct_count,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
        }
    }

    /// Snapshot suitable for persisting after a resolution.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            current_index: self.current.min(self.questions.len().saturating_sub(1)),
            score: self.score,
            correct_count: self.correct_count,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let completed_at = self.completed_at?;
        Some(QuizSummary::new(
            self.score,
            self.correct_count,
            self.questions.len(),
            self.started_at,
            completed_at,
        ))
    }

    /// Resolve the current question with the player's pick.
    ///
    /// No-op unless the current question is unanswered and `option` is one
    /// of its options.
    pub fn select_answer(&mut self, option: usize) -> SelectOutcome {
        if let Some(reason) = self.unanswered_guard() {
            return SelectOutcome::Ignored(reason);
        }
        let question = &self.questions[self.current];
        if option >= question.option_count() {
            return SelectOutcome::Ignored(IgnoreReason::OptionOutOfRange {
                option,
                count: question.option_count(),
            });
        }

        let correct = question.is_correct(option);
        if correct {
            self.score = self.score.saturating_add(self.rules.points_per_correct());
            self.correct_count = self.correct_count.saturating_add(1);
        }
        SelectOutcome::Resolved(self.resolve(Some(option), correct, ResolutionReason::Selected))
    }

    /// Resolve the current question as unanswered in time. Never scores.
    pub fn timeout(&mut self) -> SelectOutcome {
        if let Some(reason) = self.unanswered_guard() {
            return SelectOutcome::Ignored(reason);
        }
        self.remaining_secs = 0;
        SelectOutcome::Resolved(self.resolve(None, false, ResolutionReason::TimeExpired))
    }

    /// One second of countdown. Times the question out on reaching zero.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(reason) = self.unanswered_guard() {
            return TickOutcome::Ignored(reason);
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Remaining(self.remaining_secs);
        }
        match self.timeout() {
            SelectOutcome::Resolved(resolution) => TickOutcome::Expired(resolution),
            SelectOutcome::Ignored(reason) => TickOutcome::Ignored(reason),
        }
    }

    /// Move past a resolved question.
    pub fn advance(&mut self, now: DateTime<Utc>) -> AdvanceOutcome {
        match self.phase {
            SessionPhase::Unanswered => return AdvanceOutcome::Ignored(IgnoreReason::NotResolved),
            SessionPhase::Completed => return AdvanceOutcome::Ignored(IgnoreReason::Completed),
            SessionPhase::Resolved => {}
        }

        self.current += 1;
        if self.current < self.questions.len() {
            self.phase = SessionPhase::Unanswered;
            self.remaining_secs = self.rules.time_limit_secs();
            return AdvanceOutcome::NextQuestion {
                index: self.current,
            };
        }

        self.phase = SessionPhase::Completed;
        self.completed_at = Some(now);
        match self.summary() {
            Some(summary) => AdvanceOutcome::Completed(summary),
            None => AdvanceOutcome::Ignored(IgnoreReason::Completed),
        }
    }

    /// Back to the first question with all counters cleared. Valid from any phase.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.current = 0;
        self.score = 0;
        self.correct_count = 0;
        self.phase = SessionPhase::Unanswered;
        self.remaining_secs = self.rules.time_limit_secs();
        self.started_at = now;
        self.completed_at = None;
    }

    fn unanswered_guard(&self) -> Option<IgnoreReason> {
        match self.phase {
            SessionPhase::Unanswered => None,
            SessionPhase::Resolved => Some(IgnoreReason::AlreadyResolved),
            SessionPhase::Completed => Some(IgnoreReason::Completed),
        }
    }

    fn resolve(
        &mut self,
        selected: Option<usize>,
        correct: bool,
        reason: ResolutionReason,
    ) -> AnswerResolution {
        self.phase = SessionPhase::Resolved;
        AnswerResolution {
            question_index: self.current,
            selected,
            correct_option: self.questions[self.current].correct_option(),
            correct,
            reason,
            score: self.score,
            correct_count: self.correct_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn question(prompt: &str, options: &[&str], correct: usize) -> Question {
        Question::new(
            prompt,
            options.iter().map(|o| (*o).to_string()).collect(),
            correct,
        )
        .unwrap()
    }

    fn single() -> QuizSet {
        QuizSet::new(vec![question("2+2?", &["3", "4", "5"], 1)])
    }

    fn three() -> QuizSet {
        QuizSet::new(vec![
            question("2+2?", &["3", "4", "5"], 1),
            question("Capital of France?", &["Paris", "Rome"], 0),
            question("Largest planet?", &["Mars", "Jupiter", "Venus", "Earth"], 1),
        ])
    }

    fn start(set: QuizSet) -> QuizSession {
        QuizSession::start(set, QuizRules::default(), fixed_now()).unwrap()
    }

    #[test]
    fn start_rejects_empty_set() {
        let err = QuizSession::start(QuizSet::default(), QuizRules::default(), fixed_now())
            .unwrap_err();
        assert_eq!(err, QuizError::EmptyQuestionSet);
    }

    #[test]
    fn start_initializes_counters() {
        let session = start(three());
        let snap = session.snapshot();
        assert_eq!(snap.current_index, 0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.correct_count, 0);
        assert!(!snap.answered());
        assert_eq!(snap.remaining_secs, 30);
        assert_eq!(session.current_question().unwrap().prompt(), "2+2?");
    }

    #[test]
    fn correct_pick_scores_and_completes_at_full_marks() {
        let mut session = start(single());
        let SelectOutcome::Resolved(resolution) = session.select_answer(1) else {
            panic!("expected resolution");
        };
        assert!(resolution.correct);
        assert_eq!(resolution.message(), "Correct!");
        assert_eq!(session.score(), 10);
        assert_eq!(session.correct_count(), 1);

        let AdvanceOutcome::Completed(summary) = session.advance(fixed_now()) else {
            panic!("expected completion");
        };
        assert_eq!(summary.percentage(), 100);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn timeout_without_pick_scores_nothing() {
        let mut session = start(single());
        let mut outcome = TickOutcome::Remaining(30);
        for _ in 0..30 {
            outcome = session.tick();
        }
        let TickOutcome::Expired(resolution) = outcome else {
            panic!("expected expiry, got {outcome:?}");
        };
        assert!(!resolution.correct);
        assert_eq!(resolution.reason, ResolutionReason::TimeExpired);
        assert_eq!(resolution.message(), "Time's up!");
        assert_eq!(session.score(), 0);

        let AdvanceOutcome::Completed(summary) = session.advance(fixed_now()) else {
            panic!("expected completion");
        };
        assert_eq!(summary.percentage(), 0);
    }

    #[test]
    fn second_selection_is_ignored() {
        let mut session = start(three());
        session.select_answer(1);
        let again = session.select_answer(1);
        assert_eq!(again, SelectOutcome::Ignored(IgnoreReason::AlreadyResolved));
        assert_eq!(session.score(), 10);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut session = start(three());
        let outcome = session.select_answer(7);
        assert_eq!(
            outcome,
            SelectOutcome::Ignored(IgnoreReason::OptionOutOfRange {
                option: 7,
                count: 3
            })
        );
        assert_eq!(session.phase(), SessionPhase::Unanswered);
    }

    #[test]
    fn timeout_is_always_incorrect() {
        let mut session = start(three());
        for _ in 0..12 {
            session.tick();
        }
        let SelectOutcome::Resolved(resolution) = session.timeout() else {
            panic!("expected resolution");
        };
        assert!(!resolution.correct);
        assert_eq!(resolution.selected, None);
        assert_eq!(resolution.correct_option, 1);
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn ticks_after_resolution_do_nothing() {
        let mut session = start(three());
        session.tick();
        session.select_answer(0);
        let remaining = session.remaining_secs();
        assert_eq!(
            session.tick(),
            TickOutcome::Ignored(IgnoreReason::AlreadyResolved)
        );
        assert_eq!(session.remaining_secs(), remaining);
    }

    #[test]
    fn advance_requires_resolution() {
        let mut session = start(three());
        assert_eq!(
            session.advance(fixed_now()),
            AdvanceOutcome::Ignored(IgnoreReason::NotResolved)
        );
        session.select_answer(0);
        assert_eq!(
            session.advance(fixed_now()),
            AdvanceOutcome::NextQuestion { index: 1 }
        );
        assert_eq!(session.remaining_secs(), 30);
        assert_eq!(session.phase(), SessionPhase::Unanswered);
    }

    #[test]
    fn n_resolutions_and_advances_complete_any_length() {
        for len in 1..=5 {
            let set: QuizSet = (0..len)
                .map(|i| question(&format!("q{i}"), &["a", "b"], i % 2))
                .collect();
            let mut session = start(set);
            for i in 0..len {
                assert!(!session.is_complete());
                session.select_answer(0);
                let outcome = session.advance(fixed_now());
                if i + 1 < len {
                    assert_eq!(outcome, AdvanceOutcome::NextQuestion { index: i + 1 });
                } else {
                    assert!(matches!(outcome, AdvanceOutcome::Completed(_)));
                }
            }
            let summary = session.summary().unwrap();
            assert!(summary.correct_count() as usize <= summary.total());
            assert_eq!(summary.correct_count() as usize, len.div_ceil(2));
        }
    }

    #[test]
    fn restart_from_completed_resets_everything() {
        let mut session = start(single());
        session.select_answer(1);
        session.advance(fixed_now());
        assert!(session.is_complete());

        session.restart(fixed_now());
        let snap = session.snapshot();
        assert_eq!(snap.current_index, 0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.correct_count, 0);
        assert_eq!(snap.phase, SessionPhase::Unanswered);
        assert_eq!(snap.remaining_secs, 30);
        assert!(session.summary().is_none());
    }

    #[test]
    fn completed_session_ignores_everything_but_restart() {
        let mut session = start(single());
        session.timeout();
        session.advance(fixed_now());
        assert_eq!(
            session.select_answer(0),
            SelectOutcome::Ignored(IgnoreReason::Completed)
        );
        assert_eq!(session.timeout(), SelectOutcome::Ignored(IgnoreReason::Completed));
        assert_eq!(
            session.advance(fixed_now()),
            AdvanceOutcome::Ignored(IgnoreReason::Completed)
        );
    }

    #[test]
    fn resume_enters_question_after_snapshot() {
        let progress = Progress {
            current_index: 0,
            score: 10,
            correct_count: 1,
        };
        let session =
            QuizSession::resume(three(), QuizRules::default(), progress, fixed_now()).unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 10);
        assert_eq!(session.phase(), SessionPhase::Unanswered);
    }

    #[test]
    fn resume_from_last_question_is_complete() {
        let progress = Progress {
            current_index: 2,
            score: 20,
            correct_count: 2,
        };
        let session =
            QuizSession::resume(three(), QuizRules::default(), progress, fixed_now()).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.summary().unwrap().percentage(), 67);
    }

    #[test]
    fn resume_discards_inconsistent_snapshot() {
        let progress = Progress {
            current_index: 9,
            score: 90,
            correct_count: 9,
        };
        let session =
            QuizSession::resume(three(), QuizRules::default(), progress, fixed_now()).unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn progress_tracks_resolved_question() {
        let mut session = start(three());
        session.select_answer(1);
        assert_eq!(
            session.progress(),
            Progress {
                current_index: 0,
                score: 10,
                correct_count: 1
            }
        );
    }
}

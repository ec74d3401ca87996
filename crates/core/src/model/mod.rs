mod progress;
mod question;
mod quiz_set;
mod rules;
mod session;
mod summary;
mod theme;

pub use progress::Progress;
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use quiz_set::QuizSet;
pub use rules::{DEFAULT_POINTS_PER_CORRECT, DEFAULT_TIME_LIMIT_SECS, LOW_TIME_SECS, QuizRules};
pub use session::{
    AdvanceOutcome, AnswerResolution, IgnoreReason, QuizError, QuizSession, ResolutionReason,
    SelectOutcome, SessionPhase, SessionSnapshot, TickOutcome,
};
pub use summary::{PerformanceBand, QuizSummary, percentage};
pub use theme::{Theme, ThemeParseError};

mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{FeedbackVm, OptionMark, OptionVm, QuizScreenVm, SummaryVm};
pub use time_fmt::{format_elapsed, format_remaining};

//! Quiz session control: the controller, its countdown and the events it
//! pushes to the view.

mod controller;
mod countdown;
mod events;

pub use controller::{LOAD_FAILURE_MESSAGE, QuizController};
pub use countdown::{Countdown, TICK_PERIOD, tick_interval};
pub use events::{
    ChannelObserver, NullObserver, PresentedQuestion, ProgressUpdate, QuizEvent, QuizObserver,
    QuizView, ViewAdapter, apply_event,
};

#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod quiz;
pub mod settings_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizControllerError};
pub use progress_service::ProgressService;
pub use quiz::{
    ChannelObserver, NullObserver, PresentedQuestion, ProgressUpdate, QuizController, QuizEvent,
    QuizObserver, QuizView, ViewAdapter,
};
pub use settings_service::SettingsService;

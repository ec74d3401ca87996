//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizError;
use storage::questions::LoadError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizController` when a session cannot be started.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizControllerError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

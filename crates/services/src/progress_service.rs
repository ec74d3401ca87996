use std::sync::Arc;

use quiz_core::model::Progress;
use storage::repository::ProgressRepository;

/// Best-effort persistence of the `quizProgress` snapshot.
///
/// Storage failures are logged and swallowed; the quiz never stops because
/// the cache could not be written.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Saved snapshot, or `None` if missing or unreadable.
    pub async fn load(&self) -> Option<Progress> {
        match self.repo.load_progress().await {
            Ok(progress) => progress,
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable quiz progress");
                None
            }
        }
    }

    pub async fn save(&self, progress: &Progress) {
        if let Err(err) = self.repo.save_progress(progress).await {
            tracing::warn!(%err, "failed to save quiz progress");
        }
    }

    pub async fn clear(&self) {
        if let Err(err) = self.repo.clear_progress().await {
            tracing::warn!(%err, "failed to clear quiz progress");
        }
    }
}

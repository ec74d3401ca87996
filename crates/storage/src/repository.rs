use async_trait::async_trait;
use quiz_core::model::{Progress, Theme};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key holding the persisted colour scheme.
pub const THEME_KEY: &str = "theme";

/// Key holding the JSON progress snapshot.
pub const PROGRESS_KEY: &str = "quizProgress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String key-value store backing theme and progress persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored theme, `None` when never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failures or an unrecognised stored value.
    async fn get_theme(&self) -> Result<Option<Theme>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the theme cannot be written.
    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failures or a malformed snapshot.
    async fn load_progress(&self) -> Result<Option<Progress>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_progress(&self, progress: &Progress) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be removed.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> SettingsRepository for T {
    async fn get_theme(&self) -> Result<Option<Theme>, StorageError> {
        let Some(raw) = self.get(THEME_KEY).await? else {
            return Ok(None);
        };
        raw.parse::<Theme>()
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.put(THEME_KEY, theme.as_str()).await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> ProgressRepository for T {
    async fn load_progress(&self) -> Result<Option<Progress>, StorageError> {
        let Some(raw) = self.get(PROGRESS_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_progress(&self, progress: &Progress) -> Result<(), StorageError> {
        let raw = serde_json::to_string(progress)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.put(PROGRESS_KEY, &raw).await
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        self.delete(PROGRESS_KEY).await
    }
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the persisted concerns behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub settings: Arc<dyn SettingsRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryRepository::new()))
    }

    /// Share a single key-value backend between every concern.
    #[must_use]
    pub fn from_store<S: KeyValueStore + 'static>(store: Arc<S>) -> Self {
        let settings: Arc<dyn SettingsRepository> = store.clone();
        let progress: Arc<dyn ProgressRepository> = store;
        Self { settings, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn theme_round_trips() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_theme().await.unwrap(), None);

        repo.save_theme(Theme::Dark).await.unwrap();
        assert_eq!(repo.get_theme().await.unwrap(), Some(Theme::Dark));
        assert_eq!(repo.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn unknown_theme_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.put(THEME_KEY, "neon").await.unwrap();
        let err = repo.get_theme().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn progress_saves_and_clears() {
        let repo = InMemoryRepository::new();
        let progress = Progress {
            current_index: 1,
            score: 10,
            correct_count: 1,
        };
        repo.save_progress(&progress).await.unwrap();
        assert_eq!(repo.load_progress().await.unwrap(), Some(progress));

        repo.clear_progress().await.unwrap();
        assert_eq!(repo.load_progress().await.unwrap(), None);
        // Clearing twice is fine.
        repo.clear_progress().await.unwrap();
    }

    #[tokio::test]
    async fn storage_shares_one_backend() {
        let store = Arc::new(InMemoryRepository::new());
        let storage = Storage::from_store(Arc::clone(&store));
        storage.settings.save_theme(Theme::Dark).await.unwrap();
        assert_eq!(store.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
    }
}

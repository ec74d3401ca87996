use std::sync::Arc;

use quiz_core::model::Theme;
use storage::repository::SettingsRepository;

/// Best-effort theme preference.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Stored theme, falling back to `Theme::Light` when missing or unreadable.
    pub async fn theme(&self) -> Theme {
        match self.repo.get_theme().await {
            Ok(theme) => theme.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable theme preference");
                Theme::default()
            }
        }
    }

    /// Persist `theme` and return it, even if the write failed.
    pub async fn set_theme(&self, theme: Theme) -> Theme {
        if let Err(err) = self.repo.save_theme(theme).await {
            tracing::warn!(%err, %theme, "failed to save theme preference");
        }
        theme
    }

    /// Switch away from `current` and persist the result.
    pub async fn toggle_theme(&self, current: Theme) -> Theme {
        self.set_theme(current.toggled()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, KeyValueStore, StorageError, THEME_KEY};

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn defaults_to_light() {
        let service = SettingsService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn toggle_persists() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = SettingsService::new(repo.clone());

        assert_eq!(service.toggle_theme(Theme::Light).await, Theme::Dark);
        assert_eq!(service.theme().await, Theme::Dark);
        assert_eq!(repo.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));

        assert_eq!(service.toggle_theme(Theme::Dark).await, Theme::Light);
        assert_eq!(service.theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn broken_store_is_ignored() {
        let service = SettingsService::new(Arc::new(BrokenStore));
        assert_eq!(service.theme().await, Theme::Light);
        assert_eq!(service.toggle_theme(Theme::Light).await, Theme::Dark);
    }

    #[tokio::test]
    async fn garbage_theme_falls_back() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.put(THEME_KEY, "purple").await.unwrap();
        let service = SettingsService::new(repo);
        assert_eq!(service.theme().await, Theme::Light);
    }
}

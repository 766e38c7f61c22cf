use std::sync::Arc;

use sprint_core::model::{Achievement, Progress};
use storage::repository::KeyValueStore;

use crate::error::ProgressError;

pub const XP_KEY: &str = "userXP";
pub const LEVEL_KEY: &str = "userLevel";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Typed access to the persisted progress values.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load persisted progress.
    ///
    /// Missing, unreadable or malformed values fall back to zero experience
    /// and no achievements. The stored level is only compared, never used.
    pub async fn load(&self) -> Progress {
        let experience = match self.read(XP_KEY).await {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                tracing::debug!(raw = %raw, "ignoring malformed experience value");
                0
            }),
            None => 0,
        };

        let achievements = match self.read(ACHIEVEMENTS_KEY).await {
            Some(raw) => serde_json::from_str::<Vec<Achievement>>(&raw).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "ignoring malformed achievements list");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let progress = Progress::new(experience, achievements);

        if let Some(stored) = self.read(LEVEL_KEY).await {
            if stored.trim().parse::<u32>().ok() != Some(progress.level()) {
                tracing::debug!(
                    stored = %stored,
                    derived = progress.level(),
                    "stored level disagrees with experience; using derived level"
                );
            }
        }

        progress
    }

    /// Write experience and the level derived from it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if either write fails.
    pub async fn save(&self, progress: &Progress) -> Result<(), ProgressError> {
        self.store
            .set(XP_KEY, &progress.experience_points().to_string())
            .await?;
        self.store
            .set(LEVEL_KEY, &progress.level().to_string())
            .await?;
        Ok(())
    }

    /// Write the achievement list as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if encoding or the write fails.
    pub async fn save_achievements(&self, achievements: &[Achievement]) -> Result<(), ProgressError> {
        let encoded = serde_json::to_string(achievements)?;
        self.store.set(ACHIEVEMENTS_KEY, &encoded).await?;
        Ok(())
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read progress value");
                None
            }
        }
    }
}

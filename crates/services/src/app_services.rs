use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::config::EngineConfig;
use crate::engine::GameEngine;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    progress: ProgressService,
    engine: Arc<GameEngine>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: EngineConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, config).await)
    }

    /// Build services over in-memory storage; nothing survives the process.
    pub async fn in_memory(clock: Clock, config: EngineConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, config).await
    }

    async fn from_storage(storage: &Storage, clock: Clock, config: EngineConfig) -> Self {
        let progress = ProgressService::new(Arc::clone(&storage.values));
        let engine = Arc::new(GameEngine::load(clock, progress.clone(), config).await);
        Self {
            clock,
            progress,
            engine,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn progress(&self) -> ProgressService {
        self.progress.clone()
    }

    #[must_use]
    pub fn engine(&self) -> Arc<GameEngine> {
        Arc::clone(&self.engine)
    }
}

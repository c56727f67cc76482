use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::UserPreferences;
use crate::services::{Catalog, CatalogProvider, CatalogSeeds, CommentBook, RecommendationEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub engine: RecommendationEngine,
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub preferences: UserPreferences,
    pub comments: CommentBook,
}

impl AppState {
    /// Creates state backed by `provider` with the built-in seed lists
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_seeds(provider, CatalogSeeds::default())
    }

    pub fn with_seeds(provider: Arc<dyn CatalogProvider>, seeds: CatalogSeeds) -> Self {
        let catalog = Catalog::new(provider, seeds);

        Self {
            engine: RecommendationEngine::new(catalog.clone()),
            catalog,
            inner: Arc::new(RwLock::new(AppStateInner {
                preferences: UserPreferences::new(),
                comments: CommentBook::new(),
            })),
        }
    }

    /// Copy of the current preferences, so long-running work never holds the lock
    pub async fn preferences_snapshot(&self) -> UserPreferences {
        self.inner.read().await.preferences.clone()
    }
}

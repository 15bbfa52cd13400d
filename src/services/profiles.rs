use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{CandidateQuery, UserProfile};
use crate::services::{CacheKey, CacheManager, PostgresClient, PostgresError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] PostgresError),
}

/// One page of explore results
#[derive(Debug, Clone)]
pub struct ExplorePage {
    pub profiles: Vec<UserProfile>,
    /// Matching profiles across all pages
    pub total: usize,
}

/// Where handlers read profiles from
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a single profile, active or not
    async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, RepositoryError>;

    /// Newest-first page of profiles matching the query
    async fn explore_page(&self, query: &CandidateQuery) -> Result<ExplorePage, RepositoryError>;

    /// Drop any cached copy; false when that failed
    async fn invalidate(&self, id: &str) -> bool;

    async fn health_check(&self) -> bool;
}

/// Profile reads with a cache-aside layer in front of PostgreSQL
///
/// The database is the source of truth. Cache failures are logged and the
/// read falls through to the database.
#[derive(Clone)]
pub struct ProfileRepository {
    postgres: Arc<PostgresClient>,
    cache: Arc<CacheManager>,
}

impl ProfileRepository {
    pub fn new(postgres: Arc<PostgresClient>, cache: Arc<CacheManager>) -> Self {
        Self { postgres, cache }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let key = CacheKey::profile(id);

        match self.cache.get::<UserProfile>(&key).await {
            Ok(Some(profile)) => return Ok(Some(profile)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Profile cache read failed for {}: {}", id, e),
        }

        let profile = self.postgres.get_profile(id).await?;

        if let Some(profile) = &profile {
            if let Err(e) = self.cache.set(&key, profile).await {
                tracing::warn!("Profile cache write failed for {}: {}", id, e);
            }
        }

        Ok(profile)
    }

    /// Always read fresh
    async fn explore_page(&self, query: &CandidateQuery) -> Result<ExplorePage, RepositoryError> {
        let (profiles, total) = self.postgres.explore_page(query).await?;
        Ok(ExplorePage { profiles, total })
    }

    async fn invalidate(&self, id: &str) -> bool {
        match self.cache.delete(&CacheKey::profile(id)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to invalidate cached profile {}: {}", id, e);
                false
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.postgres.health_check().await.unwrap_or(false)
    }
}

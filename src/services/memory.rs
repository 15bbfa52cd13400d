use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::{matches_candidate_query, sort_newest_first};
use crate::models::{CandidateQuery, UserProfile};
use crate::services::{ExplorePage, ProfileStore, RepositoryError};

/// In-process profile store with the same query semantics as PostgreSQL
///
/// Used for local runs and handler tests.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }

    /// Insert or replace a profile
    pub async fn upsert(&self, profile: UserProfile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn explore_page(&self, query: &CandidateQuery) -> Result<ExplorePage, RepositoryError> {
        let mut matching: Vec<UserProfile> = self
            .profiles
            .read()
            .await
            .values()
            .filter(|profile| matches_candidate_query(profile, query))
            .cloned()
            .collect();

        sort_newest_first(&mut matching);

        let total = matching.len();
        let profiles = matching.into_iter().skip(query.offset).take(query.limit).collect();

        Ok(ExplorePage { profiles, total })
    }

    async fn invalidate(&self, _id: &str) -> bool {
        true
    }

    async fn health_check(&self) -> bool {
        true
    }
}

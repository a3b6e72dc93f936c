//! Contest repository.

use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryResult};
use crate::domain::contest::{Contest, LeaderboardEntry};

/// Repository for contests and leaderboards.
#[derive(Clone)]
pub struct ContestRepository {
    api: ApiClient,
    cache: QueryCache,
}

impl ContestRepository {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// All visible contests.
    pub async fn list(&self) -> QueryResult<Vec<Contest>> {
        self.cache
            .fetch(keys::contest::list(), || async move {
                self.api.get("contests").await
            })
            .await
    }

    /// One contest.
    pub async fn detail(&self, id: Uuid) -> QueryResult<Contest> {
        self.cache
            .fetch(keys::contest::detail(id), || async move {
                self.api.get(&format!("contests/{id}")).await
            })
            .await
    }

    /// Current leaderboard of a contest.
    pub async fn leaderboard(&self, contest_id: Uuid) -> QueryResult<Vec<LeaderboardEntry>> {
        self.cache
            .fetch(keys::contest::leaderboard(contest_id), || async move {
                self.api
                    .get(&format!("contests/{contest_id}/leaderboard"))
                    .await
            })
            .await
    }

    /// Join a contest as the signed-in account.
    pub async fn join(&self, contest_id: Uuid) -> ApiResult<Contest> {
        let contest: Contest = self
            .api
            .post_empty(&format!("contests/{contest_id}/join"))
            .await?;

        // Participant counts changed in the detail subtree and the list.
        self.cache
            .invalidate_prefix(&keys::contest::detail(contest_id));
        self.cache.invalidate(&keys::contest::list()).await;
        debug!("joined contest {contest_id}");

        Ok(contest)
    }
}

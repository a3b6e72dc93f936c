//! Reading materials repository.

use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryResult};
use crate::domain::common::ContentFilters;
use crate::domain::content::{ReadingContent, ReadingDraft};

/// Repository for reading exam materials.
#[derive(Clone)]
pub struct ReadingRepository {
    api: ApiClient,
    cache: QueryCache,
}

impl ReadingRepository {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// All reading materials.
    pub async fn list(&self) -> QueryResult<Vec<ReadingContent>> {
        self.cache
            .fetch(keys::reading::list(), || async move {
                self.api.get("reading").await
            })
            .await
    }

    /// Reading materials narrowed by filters.
    pub async fn list_filtered(
        &self,
        filters: &ContentFilters,
    ) -> QueryResult<Vec<ReadingContent>> {
        self.cache
            .fetch(keys::reading::list_filtered(filters), || async move {
                self.api
                    .get_with_query("reading", &filters.to_query())
                    .await
            })
            .await
    }

    /// One reading material.
    pub async fn detail(&self, id: Uuid) -> QueryResult<ReadingContent> {
        self.cache
            .fetch(keys::reading::detail(id), || async move {
                self.api.get(&format!("reading/{id}")).await
            })
            .await
    }

    /// Create a material (manager console).
    pub async fn create(&self, draft: &ReadingDraft) -> ApiResult<ReadingContent> {
        let created: ReadingContent = self.api.post("reading", draft).await?;

        self.cache.invalidate_prefix(&keys::reading::list());
        debug!("created reading material {}", created.id);

        Ok(created)
    }

    /// Update a material.
    pub async fn update(&self, id: Uuid, draft: &ReadingDraft) -> ApiResult<ReadingContent> {
        let updated: ReadingContent = self.api.put(&format!("reading/{id}"), draft).await?;

        // The item's own entry plus every list variant that may hold it.
        self.cache.invalidate(&keys::reading::detail(id)).await;
        self.cache.invalidate_prefix(&keys::reading::list());
        debug!("updated reading material {id}");

        Ok(updated)
    }

    /// Delete a material.
    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.api.delete(&format!("reading/{id}")).await?;

        self.cache.invalidate(&keys::reading::detail(id)).await;
        self.cache.invalidate_prefix(&keys::reading::list());
        debug!("deleted reading material {id}");

        Ok(())
    }
}

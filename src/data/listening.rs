//! Listening materials repository.

use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryResult};
use crate::domain::common::ContentFilters;
use crate::domain::content::{ListeningContent, ListeningDraft};

/// Repository for listening exam materials.
#[derive(Clone)]
pub struct ListeningRepository {
    api: ApiClient,
    cache: QueryCache,
}

impl ListeningRepository {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// All listening materials.
    pub async fn list(&self) -> QueryResult<Vec<ListeningContent>> {
        self.cache
            .fetch(keys::listening::list(), || async move {
                self.api.get("listening").await
            })
            .await
    }

    /// Listening materials narrowed by filters.
    pub async fn list_filtered(
        &self,
        filters: &ContentFilters,
    ) -> QueryResult<Vec<ListeningContent>> {
        self.cache
            .fetch(keys::listening::list_filtered(filters), || async move {
                self.api
                    .get_with_query("listening", &filters.to_query())
                    .await
            })
            .await
    }

    /// One listening material.
    pub async fn detail(&self, id: Uuid) -> QueryResult<ListeningContent> {
        self.cache
            .fetch(keys::listening::detail(id), || async move {
                self.api.get(&format!("listening/{id}")).await
            })
            .await
    }

    /// Create a material (manager console).
    pub async fn create(&self, draft: &ListeningDraft) -> ApiResult<ListeningContent> {
        let created: ListeningContent = self.api.post("listening", draft).await?;

        self.cache.invalidate_prefix(&keys::listening::list());
        debug!("created listening material {}", created.id);

        Ok(created)
    }

    /// Update a material.
    pub async fn update(&self, id: Uuid, draft: &ListeningDraft) -> ApiResult<ListeningContent> {
        let updated: ListeningContent = self.api.put(&format!("listening/{id}"), draft).await?;

        self.cache.invalidate(&keys::listening::detail(id)).await;
        self.cache.invalidate_prefix(&keys::listening::list());
        debug!("updated listening material {id}");

        Ok(updated)
    }

    /// Delete a material.
    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.api.delete(&format!("listening/{id}")).await?;

        self.cache.invalidate(&keys::listening::detail(id)).await;
        self.cache.invalidate_prefix(&keys::listening::list());
        debug!("deleted listening material {id}");

        Ok(())
    }
}

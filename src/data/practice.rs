//! Practice repository: catalogue, attempts, and answer submission.

use futures::future::try_join_all;
use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryError, QueryResult};
use crate::domain::common::{ContentFilters, Section};
use crate::domain::practice::{
    AnswerSubmission, AttemptResult, PracticeAttempt, PracticeMaterial, SectionData, StartAttempt,
};

/// Repository for student practice flows.
#[derive(Clone)]
pub struct PracticeRepository {
    api: ApiClient,
    cache: QueryCache,
}

impl PracticeRepository {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// Practisable materials for one exam section.
    pub async fn section_list(&self, section: Section) -> QueryResult<Vec<PracticeMaterial>> {
        self.cache
            .fetch(keys::practice::section_list(section), || async move {
                self.api
                    .get(&format!("practice/sections/{}", section.as_str()))
                    .await
            })
            .await
    }

    /// Practisable materials narrowed by filters.
    pub async fn section_list_filtered(
        &self,
        section: Section,
        filters: &ContentFilters,
    ) -> QueryResult<Vec<PracticeMaterial>> {
        let key = keys::practice::section_list_filtered(section, filters);
        self.cache
            .fetch(key, || async move {
                self.api
                    .get_with_query(
                        &format!("practice/sections/{}", section.as_str()),
                        &filters.to_query(),
                    )
                    .await
            })
            .await
    }

    /// One practice attempt.
    pub async fn attempt(&self, id: Uuid) -> QueryResult<PracticeAttempt> {
        self.cache
            .fetch(keys::practice::attempt(id), || async move {
                self.api.get(&format!("practice/attempts/{id}")).await
            })
            .await
    }

    /// Scored result of an attempt.
    pub async fn attempt_result(&self, id: Uuid) -> QueryResult<AttemptResult> {
        self.cache
            .fetch(keys::practice::attempt_result(id), || async move {
                self.api
                    .get(&format!("practice/attempts/{id}/result"))
                    .await
            })
            .await
    }

    /// Questions and material for one section of an attempt.
    pub async fn section_data(
        &self,
        attempt_id: Uuid,
        section: Section,
    ) -> QueryResult<SectionData> {
        let key = keys::practice::section_data(attempt_id, section);
        self.cache
            .fetch(key, || async move {
                self.api
                    .get(&format!(
                        "practice/attempts/{attempt_id}/sections/{}",
                        section.as_str()
                    ))
                    .await
            })
            .await
    }

    /// Warm the cache for every section of an attempt concurrently, so
    /// the exam view opens without a per-section loading gap.
    pub async fn prefetch_attempt_sections(
        &self,
        attempt: &PracticeAttempt,
    ) -> Result<(), QueryError> {
        try_join_all(
            attempt
                .sections
                .iter()
                .map(|&section| self.section_data(attempt.id, section)),
        )
        .await?;

        Ok(())
    }

    /// Start a new attempt.
    pub async fn start_attempt(&self, sections: &[Section]) -> ApiResult<PracticeAttempt> {
        let payload = StartAttempt {
            sections: sections.to_vec(),
        };
        let attempt: PracticeAttempt = self.api.post("practice/attempts", &payload).await?;

        // A brand-new attempt has no cached subtree yet.
        debug!("started attempt {}", attempt.id);
        Ok(attempt)
    }

    /// Submit an attempt's answer sheet.
    pub async fn submit_answers(
        &self,
        attempt_id: Uuid,
        submission: &AnswerSubmission,
    ) -> ApiResult<AttemptResult> {
        let result: AttemptResult = self
            .api
            .post(
                &format!("practice/attempts/{attempt_id}/answers"),
                submission,
            )
            .await?;

        // Everything derived from the attempt is stale now: the attempt
        // itself, its result, and its section data.
        self.cache
            .invalidate_prefix(&keys::practice::attempt(attempt_id));
        debug!("submitted answers for attempt {attempt_id}");

        Ok(result)
    }
}

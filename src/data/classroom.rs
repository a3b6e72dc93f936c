//! Classroom repository (teacher console).

use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryResult};
use crate::domain::classroom::{
    Assignment, AssignmentDraft, Classroom, ClassroomMessage, MessageDraft,
};

/// Repository for classrooms, assignments, and messaging.
#[derive(Clone)]
pub struct ClassroomRepository {
    api: ApiClient,
    cache: QueryCache,
}

impl ClassroomRepository {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    /// Classrooms of the signed-in teacher.
    pub async fn list(&self) -> QueryResult<Vec<Classroom>> {
        self.cache
            .fetch(keys::classroom::list(), || async move {
                self.api.get("teacher/classrooms").await
            })
            .await
    }

    /// One classroom.
    pub async fn detail(&self, id: Uuid) -> QueryResult<Classroom> {
        self.cache
            .fetch(keys::classroom::detail(id), || async move {
                self.api.get(&format!("teacher/classrooms/{id}")).await
            })
            .await
    }

    /// Assignments handed to a classroom.
    pub async fn assignments(&self, classroom_id: Uuid) -> QueryResult<Vec<Assignment>> {
        self.cache
            .fetch(keys::classroom::assignments(classroom_id), || async move {
                self.api
                    .get(&format!("teacher/classrooms/{classroom_id}/assignments"))
                    .await
            })
            .await
    }

    /// Message feed of a classroom.
    pub async fn messages(&self, classroom_id: Uuid) -> QueryResult<Vec<ClassroomMessage>> {
        self.cache
            .fetch(keys::classroom::messages(classroom_id), || async move {
                self.api
                    .get(&format!("teacher/classrooms/{classroom_id}/messages"))
                    .await
            })
            .await
    }

    /// Hand a new assignment to a classroom.
    pub async fn create_assignment(
        &self,
        classroom_id: Uuid,
        draft: &AssignmentDraft,
    ) -> ApiResult<Assignment> {
        let assignment: Assignment = self
            .api
            .post(
                &format!("teacher/classrooms/{classroom_id}/assignments"),
                draft,
            )
            .await?;

        // The assignment list and the classroom header both change; the
        // message feed does not.
        self.cache
            .invalidate_prefix(&keys::classroom::assignments(classroom_id));
        self.cache
            .invalidate(&keys::classroom::detail(classroom_id))
            .await;
        debug!("created assignment {} in classroom {classroom_id}", assignment.id);

        Ok(assignment)
    }

    /// Post a message to a classroom's feed.
    pub async fn send_message(
        &self,
        classroom_id: Uuid,
        draft: &MessageDraft,
    ) -> ApiResult<ClassroomMessage> {
        let message: ClassroomMessage = self
            .api
            .post(
                &format!("teacher/classrooms/{classroom_id}/messages"),
                draft,
            )
            .await?;

        self.cache
            .invalidate_prefix(&keys::classroom::messages(classroom_id));
        debug!("sent message to classroom {classroom_id}");

        Ok(message)
    }
}

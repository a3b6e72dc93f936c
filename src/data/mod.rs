//! Data-access layer: one repository per server domain.
//!
//! Each repository pairs cache keys from [`crate::cache::keys`] with the
//! matching API endpoints. Queries read through the shared
//! [`crate::cache::QueryCache`]; mutations call the API and, on success,
//! invalidate every cache entry under the affected key prefixes so the
//! next read refetches fresh data.

mod classroom;
mod contest;
mod listening;
mod practice;
mod reading;

use std::sync::Arc;

use crate::cache::{QueryError, QueryResult};

pub use classroom::ClassroomRepository;
pub use contest::ContestRepository;
pub use listening::ListeningRepository;
pub use practice::PracticeRepository;
pub use reading::ReadingRepository;

/// Render-ready state of a query, as a page shell sees it.
///
/// A repository call is a future; a page that wants to render before it
/// resolves starts from [`QueryState::Loading`] and settles the state
/// when the result arrives. A failed section stays interactive: the
/// error is scoped to this one query.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// The fetch has not resolved yet.
    Loading,
    /// The fetch failed; the page shows an error affordance.
    Failed(QueryError),
    /// Fresh or cached data.
    Ready(Arc<T>),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryState::Failed(_))
    }

    /// The data, when the query has succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<QueryResult<T>> for QueryState<T> {
    fn from(result: QueryResult<T>) -> Self {
        match result {
            Ok(value) => QueryState::Ready(value),
            Err(err) => QueryState::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::ApiError;

    use super::*;

    #[test]
    fn test_query_state_settles_from_results() {
        let ready = QueryState::from(Ok(Arc::new(7u32)));
        assert_eq!(ready.data(), Some(&7));
        assert!(!ready.is_loading());

        let failed: QueryState<u32> = QueryState::from(Err(Arc::new(ApiError::Unauthorized)));
        assert!(failed.is_failed());
        assert_eq!(failed.data(), None);

        assert!(QueryState::<u32>::Loading.is_loading());
    }
}

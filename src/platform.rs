//! Session wiring.
//!
//! Builds the shared API client and query cache and hands them to every
//! repository, one bundle per client session.

use tracing::info;

use crate::api::ApiClient;
use crate::auth::Session;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::data::{
    ClassroomRepository, ContestRepository, ListeningRepository, PracticeRepository,
    ReadingRepository,
};

/// Shared state of one client session.
#[derive(Clone)]
pub struct Platform {
    /// Session-scoped query cache; all repositories share it.
    pub cache: QueryCache,

    /// Auth session: login, logout, gate snapshot.
    pub session: Session,

    /// Reading materials.
    pub reading: ReadingRepository,

    /// Listening materials.
    pub listening: ListeningRepository,

    /// Student practice flows.
    pub practice: PracticeRepository,

    /// Teacher classrooms.
    pub classroom: ClassroomRepository,

    /// Contests.
    pub contest: ContestRepository,
}

impl Platform {
    /// Create a new platform session from configuration.
    pub fn new(config: &Config) -> Self {
        let api = ApiClient::new(config);
        let cache = QueryCache::new(config.cache_config());
        info!("platform session initialized against {}", config.api_base_url);

        Self {
            session: Session::new(api.clone(), cache.clone()),
            reading: ReadingRepository::new(api.clone(), cache.clone()),
            listening: ListeningRepository::new(api.clone(), cache.clone()),
            practice: PracticeRepository::new(api.clone(), cache.clone()),
            classroom: ClassroomRepository::new(api.clone(), cache.clone()),
            contest: ContestRepository::new(api, cache.clone()),
            cache,
        }
    }

    /// Create a platform session from environment configuration.
    pub fn from_env() -> Self {
        Self::new(&Config::from_env())
    }
}

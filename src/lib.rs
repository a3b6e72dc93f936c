//! Lyceum - client data layer for an IELTS exam-preparation platform
//!
//! Everything the platform's consoles (student practice, manager
//! content curation, teacher classrooms) need below the pixels: cache
//! addressing, data access, and the session state machines.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `api` - Remote platform API client (reqwest)
//! - `cache` - Hierarchical query keys and the shared Moka cache
//! - `domain` - Server-side entity models
//! - `data` - Repositories pairing keys with endpoints
//! - `auth` - Session lifecycle and the layout auth gate
//! - `view` - View-model state (answer sheet)
//! - `platform` - Per-session wiring of all of the above

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod platform;
pub mod view;

pub use api::{ApiClient, ApiError, ApiResult};
pub use auth::{AuthSnapshot, GateOutcome, Session};
pub use cache::{keys, CacheConfig, Filters, QueryCache, QueryError, QueryKey, QueryResult};
pub use config::Config;
pub use data::QueryState;
pub use platform::Platform;

use std::sync::Arc;

use hotel_core::clock::SharedClock;

use crate::config::ServerConfig;
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is either a pool handle or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hotel_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Room image storage.
    pub images: Arc<dyn ImageStore>,
    /// Source of "today" for stay-date validation.
    pub clock: SharedClock,
}

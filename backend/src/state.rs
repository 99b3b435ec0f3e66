use std::sync::Arc;

use crate::{config::Config, db::connection::DbPool, gateway::rooms::RoomRegistry};

/// Explicitly owned application context: constructed at startup, cloned
/// into every handler and connection task. Tests build their own with
/// isolated fixtures.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub rooms: Arc<RoomRegistry>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config,
            rooms: Arc::new(RoomRegistry::new()),
        }
    }
}

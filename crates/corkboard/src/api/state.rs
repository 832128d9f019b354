//! Application state shared across handlers.

use crate::config::BoardConfig;
use crate::db::Database;
use crate::message::MessageRepository;

/// Application state shared across all handlers. Cheap to clone; the
/// repository only wraps a pool handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Message repository.
    pub messages: MessageRepository,
    /// Board display settings (page sizes, site URL, title).
    pub board: BoardConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: &Database, board: BoardConfig) -> Self {
        Self {
            messages: MessageRepository::new(db.pool().clone()),
            board,
        }
    }
}

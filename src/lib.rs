pub mod api;
pub mod classify;
pub mod db;
pub mod error;
pub mod prompts;
pub mod sync;

use std::sync::Arc;

pub type SharedStore = Arc<db::NoteStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub started_at: std::time::Instant,
}

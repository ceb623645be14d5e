use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    db::{MemoryTodoStore, TodoStore, dao::TodoDao},
    routes::app,
    state::AppState,
};

pub fn test_state(store: Arc<dyn TodoStore>) -> Arc<AppState> {
    AppState::new(store)
}

/// Fully layered router over a fresh in-memory store.
pub fn test_router() -> Router {
    app(test_state(Arc::new(MemoryTodoStore::new())))
}

/// Fully layered router over a sea-orm connection, usually a `MockDatabase`.
pub fn test_router_with_db(db: &DatabaseConnection) -> Router {
    app(test_state(Arc::new(TodoDao::new(db))))
}

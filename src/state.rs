use std::sync::Arc;

use crate::{db::TodoStore, services::TodoService};

/// Shared by every handler behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Arc<Self> {
        Arc::new(Self {
            todos: TodoService::new(store),
        })
    }
}

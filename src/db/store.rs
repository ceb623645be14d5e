use async_trait::async_trait;

use crate::models::{NewTodo, Todo, TodoId, TodoPatch};

use super::dao::DaoResult;

/// Create/find/update/delete contract every todo backend fulfils.
///
/// Lookups by an unknown id are not errors: `find_by_id` and `update` yield
/// `None`, `delete` yields `false`.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Stores a new, incomplete todo under a freshly generated id.
    async fn insert(&self, todo: NewTodo) -> DaoResult<Todo>;

    /// Every todo, oldest first.
    async fn find_all(&self) -> DaoResult<Vec<Todo>>;

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<Todo>>;

    /// Applies `patch` and returns the stored record after the change.
    async fn update(&self, id: TodoId, patch: TodoPatch) -> DaoResult<Option<Todo>>;

    async fn delete(&self, id: TodoId) -> DaoResult<bool>;
}

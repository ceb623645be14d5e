use std::sync::Arc;

use tracing::info;

use crate::{
    db::TodoStore,
    error::AppError,
    models::{CreateTodoRequest, NewTodo, Todo, TodoId, TodoPatch, UpdateTodoRequest},
};

/// Stateless CRUD operations over an injected [`TodoStore`].
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.store.find_all().await?)
    }

    /// `complete` in the request is ignored; new todos always start open.
    pub async fn create(&self, request: CreateTodoRequest) -> Result<Todo, AppError> {
        let new_todo = NewTodo::from_request(request)?;
        let todo = self.store.insert(new_todo).await?;
        info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// A well-formed id with no record behind it yields `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<Todo>, AppError> {
        let id: TodoId = id.parse()?;
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn update(&self, id: &str, request: UpdateTodoRequest) -> Result<Todo, AppError> {
        let id: TodoId = id.parse()?;
        let patch = TodoPatch::from_request(request)?;
        let todo = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Todo not found (id={id})")))?;
        info!(id = %todo.id, complete = todo.complete, "todo updated");
        Ok(todo)
    }

    /// Deleting an id that is already gone still succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id: TodoId = id.parse()?;
        let removed = self.store.delete(id).await?;
        info!(%id, removed, "todo deleted");
        Ok(())
    }
}

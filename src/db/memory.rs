use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{dao::DaoResult, store::TodoStore};
use crate::models::{NewTodo, Todo, TodoId, TodoPatch};

/// Process-local todo store. Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, todo: NewTodo) -> DaoResult<Todo> {
        let stored = Todo {
            id: TodoId::generate(),
            text: todo.text,
            priority: todo.priority,
            deadline: todo.deadline,
            complete: false,
        };
        self.todos.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<Todo>> {
        Ok(self
            .todos
            .read()
            .await
            .iter()
            .find(|todo| todo.id == id)
            .cloned())
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> DaoResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };
        patch.apply(todo);
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: TodoId) -> DaoResult<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        Ok(todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryTodoStore;
    use crate::{
        db::store::TodoStore,
        models::{NewTodo, Priority, TodoPatch},
    };

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            text: text.to_string(),
            priority: Priority::Low,
            deadline: "2025-06-30".parse().expect("valid date"),
        }
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = MemoryTodoStore::new();
        let first = store.insert(new_todo("first")).await.expect("insert");
        let second = store.insert(new_todo("second")).await.expect("insert");

        let ids: Vec<_> = store
            .find_all()
            .await
            .expect("list")
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn identical_inserts_get_distinct_ids() {
        let store = MemoryTodoStore::new();
        let (a, b) = tokio::join!(
            store.insert(new_todo("same")),
            store.insert(new_todo("same"))
        );
        let (a, b) = (a.expect("insert"), b.expect("insert"));

        assert_ne!(a.id, b.id);
        assert_eq!(store.find_all().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn deleted_ids_stay_gone() {
        let store = MemoryTodoStore::new();
        let todo = store.insert(new_todo("temp")).await.expect("insert");

        assert!(store.delete(todo.id).await.expect("delete"));
        assert!(!store.delete(todo.id).await.expect("delete again"));
        assert!(store.find_by_id(todo.id).await.expect("find").is_none());
        let patch = TodoPatch {
            complete: Some(true),
            ..Default::default()
        };
        assert!(store.update(todo.id, patch).await.expect("update").is_none());
    }
}

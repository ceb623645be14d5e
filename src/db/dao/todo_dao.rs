use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use super::{DaoLayerError, DaoResult};
use crate::{
    db::{
        entities::{prelude::Todo as TodoEntity, todo},
        store::TodoStore,
    },
    models::{Deadline, NewTodo, Priority, Todo, TodoId, TodoPatch},
};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl TodoStore for TodoDao {
    async fn insert(&self, todo: NewTodo) -> DaoResult<Todo> {
        let now = Utc::now().fixed_offset();
        let model = todo::ActiveModel {
            id: Set(TodoId::generate().into_uuid()),
            text: Set(todo.text),
            priority: Set(todo.priority.as_str().to_string()),
            deadline: Set(todo.deadline.to_string()),
            complete: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let stored = model.insert(&self.db).await?;
        into_todo(stored)
    }

    async fn find_all(&self) -> DaoResult<Vec<Todo>> {
        TodoEntity::find()
            .order_by_asc(todo::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(into_todo)
            .collect()
    }

    async fn find_by_id(&self, id: TodoId) -> DaoResult<Option<Todo>> {
        TodoEntity::find_by_id(id.into_uuid())
            .one(&self.db)
            .await?
            .map(into_todo)
            .transpose()
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> DaoResult<Option<Todo>> {
        let Some(model) = TodoEntity::find_by_id(id.into_uuid()).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        if let Some(text) = patch.text {
            active.text = Set(text);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority.as_str().to_string());
        }
        if let Some(deadline) = patch.deadline {
            active.deadline = Set(deadline.to_string());
        }
        if let Some(complete) = patch.complete {
            active.complete = Set(complete);
        }
        active.updated_at = Set(Utc::now().fixed_offset());

        let updated = active.update(&self.db).await?;
        into_todo(updated).map(Some)
    }

    async fn delete(&self, id: TodoId) -> DaoResult<bool> {
        let result = TodoEntity::delete_by_id(id.into_uuid())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn into_todo(model: todo::Model) -> DaoResult<Todo> {
    let id = model.id;
    let invalid = |reason: String| DaoLayerError::invalid_record(id, reason);
    let priority = model.priority.parse::<Priority>().map_err(invalid)?;
    let deadline = model.deadline.parse::<Deadline>().map_err(invalid)?;

    Ok(Todo {
        id: model.id.into(),
        text: model.text,
        priority,
        deadline,
        complete: model.complete,
    })
}

use tracing::{error, info, warn};

use super::{ClientError, ClientResult, TodoClient};
use crate::models::{CreateTodoRequest, Priority, Todo, TodoId, UpdateTodoRequest};

/// Creation form contents before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub text: String,
    pub priority: Priority,
    pub deadline: String,
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            priority: Priority::High,
            deadline: String::new(),
        }
    }
}

impl TodoDraft {
    fn to_request(&self) -> CreateTodoRequest {
        CreateTodoRequest {
            text: Some(self.text.clone()),
            priority: Some(self.priority.as_str().to_string()),
            deadline: Some(self.deadline.clone()),
            complete: Some(false),
        }
    }
}

/// State behind the todo screen: the fetched list, the creation draft and the
/// record picked for editing or deletion.
///
/// Nothing here is authoritative. Every mutation is followed by a full
/// [`refresh`](Self::refresh), whether or not the mutation succeeded.
pub struct TodoBoard {
    client: TodoClient,
    todos: Vec<Todo>,
    draft: TodoDraft,
    selected: Option<Todo>,
    last_error: Option<String>,
}

impl TodoBoard {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            draft: TodoDraft::default(),
            selected: None,
            last_error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft(&self) -> &TodoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TodoDraft {
        &mut self.draft
    }

    pub fn selected(&self) -> Option<&Todo> {
        self.selected.as_ref()
    }

    pub fn selected_mut(&mut self) -> Option<&mut Todo> {
        self.selected.as_mut()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Reloads the list. On failure the error is logged and the list is empty.
    pub async fn refresh(&mut self) {
        match self.client.list().await {
            Ok(todos) => {
                self.todos = todos;
                self.last_error = None;
            }
            Err(err) => {
                if err.is_timeout() {
                    warn!(error = %err, "todo server did not answer in time");
                } else {
                    error!(error = %err, "error fetching todos");
                }
                self.todos.clear();
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub async fn submit_draft(&mut self) -> ClientResult<Todo> {
        let result = self.client.create(&self.draft.to_request()).await;
        if result.is_ok() {
            self.draft = TodoDraft::default();
        }
        self.finish("create", result).await
    }

    pub async fn toggle_complete(&mut self, id: TodoId) -> ClientResult<Todo> {
        let complete = self
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| todo.complete)
            .unwrap_or(false);
        let request = UpdateTodoRequest {
            complete: Some(!complete),
            ..Default::default()
        };
        let result = self.client.update(id, &request).await;
        self.finish("toggle", result).await
    }

    /// Opens the edit/delete confirmation for `id`. Returns false if the
    /// todo is not in the current list.
    pub fn select(&mut self, id: TodoId) -> bool {
        self.selected = self.todos.iter().find(|todo| todo.id == id).cloned();
        self.selected.is_some()
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }

    /// Sends the selected record's text, priority and deadline.
    pub async fn save_edit(&mut self) -> ClientResult<Todo> {
        let selected = self.take_selected()?;
        let request = UpdateTodoRequest {
            text: Some(selected.text),
            priority: Some(selected.priority.as_str().to_string()),
            deadline: Some(selected.deadline.to_string()),
            complete: None,
        };
        let result = self.client.update(selected.id, &request).await;
        self.finish("edit", result).await
    }

    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        let selected = self.take_selected()?;
        let result = self.client.delete(selected.id).await;
        self.finish("delete", result).await
    }

    fn take_selected(&mut self) -> ClientResult<Todo> {
        self.selected.take().ok_or(ClientError::NothingSelected)
    }

    async fn finish<T>(&mut self, action: &'static str, result: ClientResult<T>) -> ClientResult<T> {
        match &result {
            Ok(_) => info!(action, "todo saved"),
            Err(err) => error!(action, error = %err, "todo request failed"),
        }
        self.refresh().await;
        result
    }
}

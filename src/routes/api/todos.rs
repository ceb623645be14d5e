use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::get,
};

use crate::{
    error::AppError,
    models::{CreateTodoRequest, Todo, UpdateTodoRequest},
    response::{Envelope, Operation},
    state::AppState,
};

const BASE_PATH: &str = "/todos";

type IdParam = Result<Path<String>, PathRejection>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(BASE_PATH, get(list_todos).post(create_todo))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> Envelope<Vec<Todo>> {
    Envelope::respond(Operation::List, state.todos.list().await)
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: JsonBody<CreateTodoRequest>,
) -> Envelope<Todo> {
    let result = match body {
        Ok(Json(request)) => state.todos.create(request).await,
        Err(rejection) => Err(invalid_body(rejection)),
    };
    Envelope::respond(Operation::Create, result)
}

async fn get_todo(State(state): State<Arc<AppState>>, id: IdParam) -> Envelope<Option<Todo>> {
    let result = match id {
        Ok(Path(id)) => state.todos.get(&id).await,
        Err(rejection) => Err(invalid_id(rejection)),
    };
    Envelope::respond(Operation::Read, result)
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    id: IdParam,
    body: JsonBody<UpdateTodoRequest>,
) -> Envelope<Todo> {
    let result = match (id, body) {
        (Ok(Path(id)), Ok(Json(request))) => state.todos.update(&id, request).await,
        (Err(rejection), _) => Err(invalid_id(rejection)),
        (_, Err(rejection)) => Err(invalid_body(rejection)),
    };
    Envelope::respond(Operation::Update, result)
}

async fn delete_todo(State(state): State<Arc<AppState>>, id: IdParam) -> Envelope<()> {
    let result = match id {
        Ok(Path(id)) => state.todos.delete(&id).await,
        Err(rejection) => Err(invalid_id(rejection)),
    };
    Envelope::respond(Operation::Delete, result)
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

fn invalid_id(rejection: PathRejection) -> AppError {
    AppError::validation(rejection.body_text())
}

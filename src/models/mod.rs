pub mod todo;

pub use todo::{
    CreateTodoRequest, Deadline, NewTodo, Priority, Todo, TodoId, TodoPatch, UpdateTodoRequest,
};

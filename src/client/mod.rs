mod api;
mod board;
mod config;

pub use api::{ClientError, ClientResult, TodoClient};
pub use board::{TodoBoard, TodoDraft};
pub use config::ClientConfig;

use axum::{Router, routing::get};
use serde_json::{Value, json};

use crate::response::Envelope;

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> Envelope<Value> {
    Envelope::success("Server is running successfully!", json!({ "status": "ok" }))
}

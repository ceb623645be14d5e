use axum::Router;

pub mod public;

pub fn router() -> Router {
    Router::new().merge(public::router())
}

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{logging::panic_message, response::Envelope};

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Turns a handler panic into the 500 envelope instead of a dropped connection.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_envelope as PanicHandler)
}

fn panic_envelope(panic: Box<dyn Any + Send + 'static>) -> Response {
    // Release builds keep panic text out of response bodies.
    let error = if cfg!(debug_assertions) {
        format!("internal server error: {}", panic_message(&*panic))
    } else {
        "internal server error".to_string()
    };

    Envelope::<()>::internal(error).into_response()
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// The five todo operations, each with its own pair of envelope messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::List => "Data fetched successfully",
            Operation::Create => "Todo added successfully",
            Operation::Read => "Todo fetched successfully",
            Operation::Update => "Todo updated successfully",
            Operation::Delete => "Todo deleted successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Data fetch failed",
            Operation::Create => "Todo add failed",
            Operation::Read => "Todo fetch failed",
            Operation::Update => "Todo update failed",
            Operation::Delete => "Todo delete failed",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Uniform `{ success, message, data, error? }` body of every API response.
///
/// Every [`AppError`] travels with HTTP 200; only a caught panic carries a
/// 500 (see [`Envelope::internal`]).
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Body of the 500 returned when a handler panics.
    pub fn internal(error: impl Into<String>) -> Self {
        Self::failure(INTERNAL_ERROR_MESSAGE, error).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Wraps the outcome of `op` in its envelope.
    pub fn respond(op: Operation, result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::success(op.success_message(), data),
            Err(err) => {
                log_app_error(op, &err);
                Self::failure(op.failure_message(), err.message())
            }
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub(crate) fn log_app_error(op: Operation, err: &AppError) {
    match err {
        AppError::Validation(message) | AppError::NotFound(message) => {
            tracing::warn!(operation = op.as_str(), error = %message, "todo request rejected");
        }
        AppError::Store(message) => {
            tracing::error!(operation = op.as_str(), error = %message, "todo store error");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_envelope_keeps_http_ok_and_null_data() {
        let envelope: Envelope<Vec<u8>> =
            Envelope::respond(Operation::List, Err(AppError::store("connection reset")));

        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&envelope).expect("serializes"),
            json!({
                "success": false,
                "message": "Data fetch failed",
                "data": null,
                "error": "connection reset",
            })
        );
    }

    #[test]
    fn success_envelope_omits_error_field() {
        let envelope = Envelope::respond(Operation::Delete, Ok(()));

        assert_eq!(
            serde_json::to_value(&envelope).expect("serializes"),
            json!({
                "success": true,
                "message": "Todo deleted successfully",
                "data": null,
            })
        );
    }

    #[test]
    fn every_app_error_keeps_http_ok() {
        let errors = [
            (Operation::Create, AppError::validation("text is required"), "Todo add failed"),
            (Operation::Update, AppError::not_found("Todo not found"), "Todo update failed"),
            (Operation::Delete, AppError::store("disk full"), "Todo delete failed"),
        ];
        for (op, err, message) in errors {
            let expected_error = err.message().to_string();
            let envelope: Envelope<()> = Envelope::respond(op, Err(err));

            assert_eq!(envelope.status, StatusCode::OK, "{message}");
            assert_eq!(envelope.message, message);
            assert_eq!(envelope.error, Some(expected_error));
        }
    }

    #[test]
    fn panic_envelope_is_a_server_error() {
        let envelope = Envelope::<()>::internal("boom");

        assert_eq!(envelope.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.message, INTERNAL_ERROR_MESSAGE);
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }
}

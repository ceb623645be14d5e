use sea_orm::DbErr;
use uuid::Uuid;

/// Failures below the service layer. Both variants surface to API callers as
/// store errors in a failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    /// A row whose priority or deadline column no longer decodes.
    #[error("Stored todo is invalid (id={id}): {reason}")]
    InvalidRecord { id: Uuid, reason: String },
}

impl DaoLayerError {
    pub fn invalid_record(id: Uuid, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id,
            reason: reason.into(),
        }
    }
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (slug, token, email) that matched nothing.
    #[error("Entity not found: {entity} '{key}'")]
    NotFoundKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A validation failure tied to one input field.
    #[error("Validation failed: {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

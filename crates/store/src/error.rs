//! Task store error types.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid task: {0}")]
    Invalid(String),

    #[error("task not found: {0}")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map to an HTTP status code for API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Invalid(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_error() {
        let err = StoreError::Invalid("name must not be empty".to_string());
        assert!(err.to_string().contains("name"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_not_found_error() {
        let id = Uuid::new_v4();
        let err = StoreError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
        assert_eq!(err.status_code(), 404);
    }

}

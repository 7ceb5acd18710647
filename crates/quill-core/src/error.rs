//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// A missing post is not an error: lookups and updates return `Ok(None)`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    /// Validation error for a required field that was absent or blank.
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("Path `{field}` is required."))
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_the_field() {
        let err = DomainError::required("title");
        assert!(err.to_string().contains("`title` is required"));
    }

    #[test]
    fn repository_errors_pass_through_unchanged() {
        let err: DomainError = RepoError::Query("syntax error".into()).into();
        assert_eq!(err.to_string(), "Query execution failed: syntax error");
    }
}

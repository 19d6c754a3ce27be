use thiserror::Error;

/// Errors from the membership toggle path.
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("target not found")]
    NotFound,

    #[error("user is not vouched")]
    NotVouched,

    #[error("group is not accepting new members")]
    NotAccepting,

    #[error("storage error: {0}")]
    Storage(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors from group create/edit.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("group not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("name '{0}' is already taken")]
    NameConflict(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the directory read path.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in commons-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

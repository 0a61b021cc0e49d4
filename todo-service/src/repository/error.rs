//! Repository error types
//!
//! Every repository failure falls in one of three classes: the row was not
//! found, the version check of an update failed, or the store itself failed
//! (timeouts and driver errors). Callers decide how each class maps to HTTP.
//!
//! # Example
//!
//! ```rust
//! use todo_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::Get, 42);
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert!(!error.is_internal());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Inserting a new list
    Insert,
    /// Fetching a single list by id
    Get,
    /// Version-checked update
    Update,
    /// Hard delete
    Delete,
    /// Paginated search
    GetAll,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Get => write!(f, "get"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::GetAll => write!(f, "get_all"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No matching row
    NotFound,
    /// The stored version no longer matches the caller's version
    EditConflict,
    /// The query exceeded its deadline
    Timeout,
    /// Any other store-level failure
    Database,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::EditConflict => write!(f, "edit_conflict"),
            Self::Timeout => write!(f, "timeout"),
            Self::Database => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The id of the list involved, when known
    pub list_id: Option<i64>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            list_id: None,
        }
    }

    /// The record does not exist (or the id can never exist)
    pub fn not_found(operation: RepositoryOperation, id: i64) -> Self {
        Self::new(operation, RepositoryErrorKind::NotFound, "record not found").with_list_id(id)
    }

    /// The version-checked update matched no row
    pub fn edit_conflict(id: i64) -> Self {
        Self::new(
            RepositoryOperation::Update,
            RepositoryErrorKind::EditConflict,
            "edit conflict",
        )
        .with_list_id(id)
    }

    /// The query did not finish within its deadline
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Driver, connection or query failure
    pub fn database(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Database, message)
    }

    /// Map a driver error raised while running `operation`
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                Self::timeout(operation, "timed out acquiring a database connection")
            }
            other => Self::database(operation, other.to_string()),
        }
    }

    /// Attach the id of the list involved
    #[must_use]
    pub fn with_list_id(mut self, id: i64) -> Self {
        self.list_id = Some(id);
        self
    }

    /// True for store-level failures that callers surface as internal errors
    pub fn is_internal(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::Timeout | RepositoryErrorKind::Database
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.list_id {
            write!(f, " [list: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

//! Core error types for the Eventbite engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer,
//! and transport errors are converted by the HTTP client.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Every variant is scoped to the single operation that raised it; none of them
/// leave prior state modified.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Contribution rejected: {0}")]
    Admission(#[from] AdmissionError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the failure is transient and the same request may succeed later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Connectivity(_)
                | Error::Database(DatabaseError::ConnectionFailed(_))
                | Error::Database(DatabaseError::PoolCreationFailed(_))
        )
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::InvalidInput,
            Error::Admission(AdmissionError::CapacityExceeded { .. }) => {
                ErrorKind::CapacityExceeded
            }
            Error::Admission(AdmissionError::DuplicateContributor { .. }) => {
                ErrorKind::DuplicateContributor
            }
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            e if e.is_transient() => ErrorKind::ConnectivityFailure,
            _ => ErrorKind::Internal,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Error::Database(DatabaseError::NotFound(what.into()))
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(reason.into()))
    }
}

/// Error kinds shared by the server and the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    CapacityExceeded,
    DuplicateContributor,
    Unauthorized,
    NotFound,
    ConnectivityFailure,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorKind::DuplicateContributor => "DUPLICATE_CONTRIBUTOR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ConnectivityFailure => "CONNECTIVITY_FAILURE",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "INVALID_INPUT" => Some(ErrorKind::InvalidInput),
            "CAPACITY_EXCEEDED" => Some(ErrorKind::CapacityExceeded),
            "DUPLICATE_CONTRIBUTOR" => Some(ErrorKind::DuplicateContributor),
            "UNAUTHORIZED" => Some(ErrorKind::Unauthorized),
            "NOT_FOUND" => Some(ErrorKind::NotFound),
            "CONNECTIVITY_FAILURE" => Some(ErrorKind::ConnectivityFailure),
            "INTERNAL" => Some(ErrorKind::Internal),
            _ => None,
        }
    }
}

/// Failures of the event store, already translated out of Diesel and SQLite.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be opened or a pooled connection was unavailable.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// No event, goal or contribution with the given id.
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A goal or contribution referenced a parent that does not exist.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// The single writer stopped or dropped a job.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must be a whole number, got '{value}'")]
    NotNumeric { field: String, value: String },
}

/// Reasons a proposed contribution is turned away by the admission controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Goal '{goal}' is already complete ({total}/{target})")]
    CapacityExceeded {
        goal: String,
        total: i64,
        target: i32,
    },

    #[error("'{contributor}' already pledged to goal '{goal}'")]
    DuplicateContributor { goal: String, contributor: String },
}

//! Error types for the checklist library.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all checklist operations.
#[derive(Error, Debug)]
pub enum ChecklistError {
    /// Checklist not found for the given ID
    #[error("Checklist with ID {id} not found")]
    NotFound { id: u64 },
    /// Another checklist is still open for the same vehicle
    #[error("An open checklist already exists for vehicle {plate}")]
    Conflict { plate: String },
    /// Finalize was requested for a checklist that is already finalized
    #[error("Checklist with ID {id} is already finalized")]
    AlreadyFinalized { id: u64 },
    /// Payload edit attempted on a finalized or locked checklist
    #[error("Checklist with ID {id} is locked and cannot be edited")]
    Locked { id: u64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Errors surfaced by the record store or the privileged operations
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Report export errors
    #[error("Export error: {source}")]
    Export {
        #[from]
        source: csv::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ChecklistError {
        ChecklistError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ChecklistError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Maps a store failure for a specific checklist, turning a missing
    /// record into [`ChecklistError::NotFound`].
    pub fn from_store(id: u64, error: StoreError) -> Self {
        match error.kind() {
            StoreErrorKind::NotFound => ChecklistError::NotFound { id },
            _ => ChecklistError::Store(error),
        }
    }

    /// Returns the store error kind when this error came from the store.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            ChecklistError::Store(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Classification of record store failures.
///
/// The adapter decides the kind; callers branch on it instead of inspecting
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The referenced record does not exist
    NotFound,
    /// A state precondition did not hold (e.g. already finalized)
    Conflict,
    /// The requested operation is not installed on this backend
    Unsupported,
    /// The access policy rejected the request
    PermissionDenied,
    /// Any other persistence failure
    Backend,
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorKind::NotFound => "not found",
            StoreErrorKind::Conflict => "conflict",
            StoreErrorKind::Unsupported => "unsupported",
            StoreErrorKind::PermissionDenied => "permission denied",
            StoreErrorKind::Backend => "backend failure",
        }
    }

    /// Whether a privileged operation failing with this kind should fall back
    /// to the manual write path.
    pub fn is_fallback_trigger(&self) -> bool {
        matches!(
            self,
            StoreErrorKind::Unsupported | StoreErrorKind::PermissionDenied
        )
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by a [`crate::store::ChecklistStore`] or
/// [`crate::store::PrivilegedOps`] implementation.
#[derive(Debug)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Conflict, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unsupported, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::PermissionDenied, message)
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Backend, message)
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message, classifying them into a
    /// [`StoreErrorKind`].
    fn db_context(self, message: &str) -> StoreResult<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> StoreResult<T> {
        self.map_err(|e| {
            let kind = classify_sqlite_error(&e);
            StoreError::new(kind, message).with_source(e)
        })
    }
}

fn classify_sqlite_error(error: &rusqlite::Error) -> StoreErrorKind {
    match error {
        rusqlite::Error::QueryReturnedNoRows => StoreErrorKind::NotFound,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER =>
        {
            StoreErrorKind::PermissionDenied
        }
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreErrorKind::Conflict
        }
        _ => StoreErrorKind::Backend,
    }
}

/// Result type alias for checklist operations
pub type Result<T> = std::result::Result<T, ChecklistError>;

/// Result type alias for store adapters
pub type StoreResult<T> = std::result::Result<T, StoreError>;

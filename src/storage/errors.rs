//! Storage error types
//!
//! Error codes:
//! - CHIRPY_STORAGE_INIT_FAILED (FATAL severity)
//! - CHIRPY_STORAGE_WRITE_FAILED (ERROR severity)
//! - CHIRPY_STORAGE_READ_FAILED (ERROR severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// chirpy must not start (or must terminate)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Backing file unreadable or malformed at startup
    ChirpyStorageInitFailed,
    /// Persisting the store to the backing file failed
    ChirpyStorageWriteFailed,
    /// In-memory store could not be read
    ChirpyStorageReadFailed,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::ChirpyStorageInitFailed => "CHIRPY_STORAGE_INIT_FAILED",
            StorageErrorCode::ChirpyStorageWriteFailed => "CHIRPY_STORAGE_WRITE_FAILED",
            StorageErrorCode::ChirpyStorageReadFailed => "CHIRPY_STORAGE_READ_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::ChirpyStorageInitFailed => Severity::Fatal,
            StorageErrorCode::ChirpyStorageWriteFailed => Severity::Error,
            StorageErrorCode::ChirpyStorageReadFailed => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional I/O cause.
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    /// Backing file exists but could not be read
    pub fn init_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::ChirpyStorageInitFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Backing file was read but its contents are not a valid store
    pub fn malformed_store(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::ChirpyStorageInitFailed,
            message: message.into(),
            details: Some(details.into()),
            source: None,
        }
    }

    /// Writing the store to disk failed
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::ChirpyStorageWriteFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Write failed without an underlying I/O error (lock poisoning, encoding)
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::ChirpyStorageWriteFailed,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// In-memory mapping could not be read
    pub fn read_failed(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::ChirpyStorageReadFailed,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether the process must not continue after this error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

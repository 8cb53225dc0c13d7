//! Status codes and error handling
//!
//! Lookups never fail: a missing record is an empty `Option` and a missed
//! delete is `false`. Errors only arise while building a store from an
//! invalid configuration, or in the driver's I/O.

use thiserror::Error;

/// Bookshelf status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum StatusCode {
    /// Operation completed successfully
    Success = 0,
    /// Invalid operation (unknown menu choice or search type)
    InvalidOperation = 1,
    /// I/O error occurred
    IoError = 2,
    /// No record matched the requested title or ISBN
    KeyNotFound = 4,
    /// Configuration value out of range
    InvalidConfiguration = 20,
    /// Unknown status code
    Unknown = 65535,
}

impl StatusCode {
    /// Create a StatusCode from a raw u16 value
    pub fn from_raw(code: u16) -> Self {
        match code {
            0 => StatusCode::Success,
            1 => StatusCode::InvalidOperation,
            2 => StatusCode::IoError,
            4 => StatusCode::KeyNotFound,
            20 => StatusCode::InvalidConfiguration,
            _ => StatusCode::Unknown,
        }
    }

    /// Get the raw status code value
    pub fn as_raw(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success status
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Success)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_raw(), match self {
            StatusCode::Success => "Success",
            StatusCode::InvalidOperation => "Invalid operation",
            StatusCode::IoError => "I/O error",
            StatusCode::KeyNotFound => "Key value not found",
            StatusCode::InvalidConfiguration => "Invalid configuration",
            StatusCode::Unknown => "Error",
        })
    }
}

/// Main error type for the Bookshelf engine
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Bookshelf status {0}")]
    Status(StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShelfError {
    /// Get the status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShelfError::Status(code) => *code,
            ShelfError::Io(_) => StatusCode::IoError,
            ShelfError::InvalidConfig(_) => StatusCode::InvalidConfiguration,
        }
    }
}

impl From<StatusCode> for ShelfError {
    fn from(code: StatusCode) -> Self {
        ShelfError::Status(code)
    }
}

/// Result type for Bookshelf operations
pub type ShelfResult<T> = Result<T, ShelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_roundtrip() {
        for code in [0, 1, 2, 4, 20] {
            let status = StatusCode::from_raw(code);
            assert_eq!(status.as_raw(), code);
        }
        assert_eq!(StatusCode::from_raw(3), StatusCode::Unknown);
    }

    #[test]
    fn test_success_check() {
        assert!(StatusCode::Success.is_success());
        assert!(!StatusCode::KeyNotFound.is_success());
    }

    #[test]
    fn test_error_status_mapping() {
        let err = ShelfError::InvalidConfig("bucket_count must be > 0".into());
        assert_eq!(err.status_code(), StatusCode::InvalidConfiguration);

        let err: ShelfError = StatusCode::KeyNotFound.into();
        assert_eq!(err.status_code(), StatusCode::KeyNotFound);
        assert_eq!(err.to_string(), "Bookshelf status 4 (Key value not found)");
    }
}

//! Error types for Stardock core.

use std::{error::Error, fmt};

/// Error type for catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// A required field was missing or a value fell outside its bounds.
    InvalidInput(String),
    /// The referenced ship does not exist.
    NotFound,
    /// The persistence layer failed; surfaced unchanged, never retried.
    Storage(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound => write!(f, "ship not found"),
            Self::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for CatalogError {}

/// Convenience result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::CatalogError;

    #[test]
    fn invalid_input_formats_message() {
        let error = CatalogError::InvalidInput("speed out of range".to_string());
        assert_eq!(format!("{error}"), "invalid input: speed out of range");
    }

    #[test]
    fn not_found_formats_message() {
        assert_eq!(format!("{}", CatalogError::NotFound), "ship not found");
    }

    #[test]
    fn storage_formats_message() {
        let error = CatalogError::Storage("connection refused".to_string());
        assert_eq!(format!("{error}"), "storage error: connection refused");
    }
}

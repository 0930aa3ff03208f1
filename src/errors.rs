use thiserror::Error;

use crate::domain::ItemId;

/// Rejections raised before any field of the month store is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty name")]
    EmptyName,
    #[error("invalid price")]
    InvalidPrice,
    #[error("invalid quadrant")]
    InvalidQuadrant,
}

/// Errors surfaced by explicit, user-initiated store commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Failures of the backing blob store. These never escape a store mutation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal errors of the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_stable() {
        assert_eq!(ValidationError::EmptyName.to_string(), "empty name");
        assert_eq!(ValidationError::InvalidPrice.to_string(), "invalid price");
        assert_eq!(
            ValidationError::InvalidQuadrant.to_string(),
            "invalid quadrant"
        );
    }

    #[test]
    fn store_error_wraps_validation() {
        let err: StoreError = ValidationError::InvalidPrice.into();
        assert_eq!(err, StoreError::Validation(ValidationError::InvalidPrice));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("invalid price"));
    }
}

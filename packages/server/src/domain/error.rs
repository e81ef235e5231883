//! Domain layer error definitions.

use thiserror::Error;

/// Errors raised by a [`RelayRepository`](super::RelayRepository) implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

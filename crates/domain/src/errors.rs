//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Chat message was empty after trimming
    #[error("Message must not be empty")]
    EmptyMessage,

    /// Coordinates outside the valid latitude/longitude ranges
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

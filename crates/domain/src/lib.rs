//! Domain layer for Yammi
//!
//! Contains the shared value objects, entities and the user-facing error
//! taxonomy used by the chat and POI search clients. This layer performs no
//! I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

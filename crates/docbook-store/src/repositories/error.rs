//! Error handling utilities for repositories

use docbook_core::error::DomainError;
use docbook_core::value_objects::EntityId;

/// Convert an I/O error to DomainError
pub fn map_io_error(e: std::io::Error) -> DomainError {
    DomainError::StorageError(e.to_string())
}

/// A stored document that no longer parses
pub fn map_corrupt(collection: &'static str, e: serde_json::Error) -> DomainError {
    DomainError::CorruptRecord {
        collection,
        reason: e.to_string(),
    }
}

/// Serialization failures are internal bugs, not user errors
pub fn map_serialize_error(e: serde_json::Error) -> DomainError {
    DomainError::InternalError(format!("Serialization failed: {e}"))
}

/// Create a "user not found" error
pub fn user_not_found(id: &EntityId) -> DomainError {
    DomainError::UserNotFound(id.clone())
}

/// Create an "appointment not found" error
pub fn appointment_not_found(id: &EntityId) -> DomainError {
    DomainError::AppointmentNotFound(id.clone())
}

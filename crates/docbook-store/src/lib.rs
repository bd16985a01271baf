//! # docbook-store
//!
//! Storage layer implementing repository traits on top of a key-value store.
//!
//! ## Overview
//!
//! This crate provides key-value implementations for all repository traits
//! defined in `docbook-core`. It handles:
//!
//! - Key-value adapters (in-memory and one-JSON-file-per-key)
//! - Storage records with the persisted camelCase layout
//! - Entity ↔ record mappers
//! - Repository implementations
//! - Backup snapshots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docbook_store::{FileStore, KvUserRepository};
//! use docbook_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileStore::open("./data").await?);
//!     let users = KvUserRepository::new(store);
//!     let doctors = users.list().await?;
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod kv;
pub mod mappers;
pub mod models;
pub mod repositories;

// Re-export commonly used types
pub use backup::Snapshot;
pub use kv::{keys, FileStore, MemoryStore};
pub use models::{AppointmentRecord, AvailabilityRecord, UserRecord};
pub use repositories::{KvAppointmentRepository, KvSessionRepository, KvUserRepository};

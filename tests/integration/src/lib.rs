//! Integration test utilities for DocBook
//!
//! This crate provides helpers for running end-to-end scenarios against
//! the service layer over in-memory and file-backed stores.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod actor;
pub mod appointment;
pub mod availability;
pub mod backup;
pub mod context;
pub mod error;
pub mod identity;
pub mod search;
pub mod seed;
pub mod session;
pub mod stats;

// Re-export all services for convenience
pub use actor::Actor;
pub use appointment::AppointmentService;
pub use availability::AvailabilityService;
pub use backup::BackupService;
pub use context::{AdminCredentials, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::{IdentityService, NewUser};
pub use search::SearchService;
pub use seed::{SeedOutcome, SeedService};
pub use session::{Session, SessionService};
pub use stats::StatsService;

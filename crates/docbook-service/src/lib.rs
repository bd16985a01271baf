//! # docbook-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every service borrows a shared [`ServiceContext`]; mutating operations
//! take the acting user as an explicit [`Actor`].

pub mod dto;
pub mod services;

pub use services::{
    Actor, AdminCredentials, AppointmentService, AvailabilityService, BackupService,
    IdentityService, NewUser, SearchService, SeedOutcome, SeedService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, Session, SessionService, StatsService,
};

//! # docbook-app
//!
//! Startup wiring for DocBook: configuration, storage, seeding and the
//! landing view.

pub mod landing;
pub mod server;
pub mod state;

pub use landing::Landing;
pub use server::{bootstrap, create_app_state, run};
pub use state::AppState;

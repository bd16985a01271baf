//! Storage keys

/// JSON array of user records
pub const USERS: &str = "docbook_users";

/// JSON array of appointment records
pub const APPOINTMENTS: &str = "docbook_appointments";

/// Single user record (without password hash) of the signed-in user
pub const CURRENT_USER: &str = "docbook_current_user";

/// `"true"` once sample data has been written
pub const INITIALIZED: &str = "docbook_initialized";

/// Every key this application writes
pub const ALL: [&str; 4] = [USERS, APPOINTMENTS, CURRENT_USER, INITIALIZED];

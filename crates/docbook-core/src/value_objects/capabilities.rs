//! Capability bitflags for role-based access control
//!
//! Each role maps to a fixed capability set. Services check the acting
//! user's capabilities before running an operation.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// What an acting user may do
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Book appointments for yourself
        const BOOK_APPOINTMENTS     = 1 << 0;
        /// Reschedule or cancel your own bookings
        const MANAGE_OWN_BOOKINGS   = 1 << 1;
        /// Rate doctors
        const RATE_DOCTORS          = 1 << 2;
        /// Edit the weekly availability template
        const MANAGE_AVAILABILITY   = 1 << 3;
        /// Approve, decline and complete appointments you attend as doctor
        const REVIEW_APPOINTMENTS   = 1 << 4;
        /// Edit your own doctor profile
        const EDIT_DOCTOR_PROFILE   = 1 << 5;
        /// Approve, reject and delete user accounts
        const MODERATE_USERS        = 1 << 6;
        /// Force-approve, cancel and delete any appointment
        const OVERRIDE_APPOINTMENTS = 1 << 7;
        /// Export, import and reset stored data
        const MANAGE_DATA           = 1 << 8;

        const PATIENT = Self::BOOK_APPOINTMENTS.bits()
            | Self::MANAGE_OWN_BOOKINGS.bits()
            | Self::RATE_DOCTORS.bits();

        const DOCTOR = Self::MANAGE_AVAILABILITY.bits()
            | Self::REVIEW_APPOINTMENTS.bits()
            | Self::EDIT_DOCTOR_PROFILE.bits();

        const ADMIN = Self::MODERATE_USERS.bits()
            | Self::OVERRIDE_APPOINTMENTS.bits()
            | Self::MANAGE_DATA.bits();
    }
}

impl Capabilities {
    /// Check if the set contains a required capability
    #[inline]
    pub fn has(&self, capability: Capabilities) -> bool {
        self.contains(capability)
    }

    /// Check if the set has any of the given capabilities
    #[inline]
    pub fn has_any(&self, capabilities: Capabilities) -> bool {
        self.intersects(capabilities)
    }

    /// Names of all individual capabilities that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::empty()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.list().join("|"))
    }
}

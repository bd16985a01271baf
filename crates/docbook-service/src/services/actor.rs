//! The identity on whose behalf an operation runs

use docbook_core::entities::{Role, User};
use docbook_core::value_objects::{Capabilities, EntityId};

use super::error::{ServiceError, ServiceResult};

/// Caller identity passed explicitly into mutating operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: EntityId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: EntityId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    /// Fail with `PermissionDenied` unless the role grants `capability`
    pub fn require(&self, capability: Capabilities) -> ServiceResult<()> {
        if self.capabilities().has(capability) {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(capability.list().join(", ")))
        }
    }

    /// Fail unless the actor is `user_id` and holds `capability`
    pub fn require_self(&self, user_id: &EntityId, capability: Capabilities) -> ServiceResult<()> {
        self.require(capability)?;
        if &self.id == user_id {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(format!(
                "{} on behalf of another user",
                capability.list().join(", ")
            )))
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id.clone(), user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_by_role() {
        let patient = Actor::new(EntityId::new("p"), Role::Patient);
        assert!(patient.require(Capabilities::BOOK_APPOINTMENTS).is_ok());
        assert!(matches!(
            patient.require(Capabilities::MODERATE_USERS),
            Err(ServiceError::PermissionDenied { permission }) if permission == "MODERATE_USERS"
        ));

        let admin = Actor::new(EntityId::new("a"), Role::Admin);
        assert!(admin.require(Capabilities::OVERRIDE_APPOINTMENTS).is_ok());
        assert!(admin.require(Capabilities::BOOK_APPOINTMENTS).is_err());
    }

    #[test]
    fn test_require_self() {
        let doctor = Actor::new(EntityId::new("d1"), Role::Doctor);
        assert!(doctor
            .require_self(&EntityId::new("d1"), Capabilities::MANAGE_AVAILABILITY)
            .is_ok());
        assert!(doctor
            .require_self(&EntityId::new("d2"), Capabilities::MANAGE_AVAILABILITY)
            .is_err());
    }
}

//! Seeding service
//!
//! Writes the demo data set on first run and keeps the canonical admin
//! account in place on every later run.

use chrono::Days;
use tracing::{info, instrument, warn};

use docbook_core::entities::{Appointment, AppointmentStatus, DoctorProfile, Role, User};
use docbook_core::value_objects::{Capabilities, SlotTime};
use docbook_store::kv::{get_flag, keys, set_flag};

use super::actor::Actor;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

const DEMO_PASSWORD: &str = "password123";
const ADMIN_NAME: &str = "Admin User";

/// What `initialize` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// First run: demo users and appointments written
    Seeded,
    /// No admin existed; one was created
    AdminCreated,
    /// The admin's email had drifted; credentials were reset
    AdminRepaired,
    /// Nothing to do
    Unchanged,
}

struct DemoDoctor {
    name: &'static str,
    email: &'static str,
    specialty: &'static str,
    location: &'static str,
    bio: &'static str,
    rating: f64,
}

const DEMO_DOCTORS: [DemoDoctor; 3] = [
    DemoDoctor {
        name: "Dr. Sarah Wilson",
        email: "doctor@example.com",
        specialty: "Cardiology",
        location: "New York, NY",
        bio: "Experienced cardiologist with 15 years of practice. Specializing in heart disease prevention and treatment.",
        rating: 4.8,
    },
    DemoDoctor {
        name: "Dr. Michael Chen",
        email: "doctor2@example.com",
        specialty: "Dermatology",
        location: "Los Angeles, CA",
        bio: "Board-certified dermatologist focusing on skin cancer prevention and cosmetic dermatology.",
        rating: 4.9,
    },
    DemoDoctor {
        name: "Dr. Emily Rodriguez",
        email: "doctor3@example.com",
        specialty: "Pediatrics",
        location: "Chicago, IL",
        bio: "Pediatrician dedicated to providing comprehensive care for children from infancy through adolescence.",
        rating: 4.7,
    },
];

/// Seeding service
pub struct SeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SeedService<'a> {
    /// Create a new SeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Seed on first run, otherwise repair the admin account
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> ServiceResult<SeedOutcome> {
        if get_flag(self.ctx.store(), keys::INITIALIZED).await? {
            return self.repair_admin().await;
        }

        self.seed_demo_data().await?;
        set_flag(self.ctx.store(), keys::INITIALIZED, true).await?;

        info!("Demo data seeded");

        Ok(SeedOutcome::Seeded)
    }

    /// Wipe every key and seed again
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn reset(&self, actor: &Actor) -> ServiceResult<SeedOutcome> {
        actor.require(Capabilities::MANAGE_DATA)?;

        let _guard = self.ctx.lock_writes().await;
        self.ctx.store().clear().await?;
        warn!("All stored data cleared");

        self.initialize().await
    }

    async fn repair_admin(&self) -> ServiceResult<SeedOutcome> {
        let canonical = self.ctx.admin_credentials();
        let admins = self.ctx.user_repo().list_by_role(Role::Admin).await?;
        if admins.iter().any(|a| a.email == canonical.email) {
            return Ok(SeedOutcome::Unchanged);
        }

        self.release_admin_email().await?;

        let Some(mut admin) = admins.into_iter().next() else {
            let password_hash = self.ctx.password_service().hash(&canonical.password)?;
            let admin = User::new(
                self.ctx.generate_id(),
                ADMIN_NAME.to_string(),
                canonical.email.clone(),
                Role::Admin,
            );
            self.ctx.user_repo().create(&admin, &password_hash).await?;
            info!(email = %canonical.email, "Admin account created");
            return Ok(SeedOutcome::AdminCreated);
        };

        let password_hash = self.ctx.password_service().hash(&canonical.password)?;
        admin.email.clone_from(&canonical.email);
        self.ctx.user_repo().update(&admin).await?;
        self.ctx
            .user_repo()
            .update_password(&admin.id, &password_hash)
            .await?;
        SessionService::new(self.ctx).sync_user(&admin).await?;

        info!(email = %canonical.email, "Admin credentials restored");

        Ok(SeedOutcome::AdminRepaired)
    }

    /// Move a non-admin account off the canonical admin email
    async fn release_admin_email(&self) -> ServiceResult<()> {
        let canonical = &self.ctx.admin_credentials().email;
        let Some(mut holder) = self.ctx.user_repo().find_by_email(canonical).await? else {
            return Ok(());
        };

        holder.email = format!("displaced-{}@docbook.invalid", holder.id);
        self.ctx.user_repo().update(&holder).await?;
        SessionService::new(self.ctx).sync_user(&holder).await?;

        warn!(user_id = %holder.id, email = %holder.email, "Account moved off the admin email");

        Ok(())
    }

    async fn seed_demo_data(&self) -> ServiceResult<()> {
        let users = self.ctx.user_repo();
        let demo_hash = self.ctx.password_service().hash(DEMO_PASSWORD)?;

        let patient = User::new(
            self.ctx.generate_id(),
            "John Patient".to_string(),
            "patient@example.com".to_string(),
            Role::Patient,
        );
        users.create(&patient, &demo_hash).await?;

        let mut doctors = Vec::with_capacity(DEMO_DOCTORS.len());
        for demo in &DEMO_DOCTORS {
            let mut profile = DoctorProfile::new(
                demo.specialty.to_string(),
                demo.location.to_string(),
                demo.bio.to_string(),
            );
            profile.rating = demo.rating;

            let mut doctor = User::new(
                self.ctx.generate_id(),
                demo.name.to_string(),
                demo.email.to_string(),
                Role::Doctor,
            )
            .with_doctor_profile(profile);
            doctor.approved = true;

            users.create(&doctor, &demo_hash).await?;
            doctors.push(doctor);
        }

        let canonical = self.ctx.admin_credentials();
        let admin_hash = self.ctx.password_service().hash(&canonical.password)?;
        let admin = User::new(
            self.ctx.generate_id(),
            ADMIN_NAME.to_string(),
            canonical.email.clone(),
            Role::Admin,
        );
        users.create(&admin, &admin_hash).await?;

        let today = self.ctx.clock().today();
        let demo_appointments = [
            (0, 7, (10, 0), AppointmentStatus::Confirmed, "Regular checkup"),
            (1, 14, (14, 30), AppointmentStatus::Pending, "Skin consultation"),
        ];
        for (doctor_index, days_ahead, (hour, minute), status, reason) in demo_appointments {
            let doctor = doctors
                .get(doctor_index)
                .ok_or_else(|| ServiceError::internal("demo doctor missing"))?;
            let date = today
                .checked_add_days(Days::new(days_ahead))
                .ok_or_else(|| ServiceError::internal("demo date out of range"))?;
            let time = SlotTime::new(hour, minute)
                .map_err(|e| ServiceError::internal(e.to_string()))?;

            let mut appointment = Appointment::new(
                self.ctx.generate_id(),
                doctor.id.clone(),
                patient.id.clone(),
                date,
                time,
            )
            .with_reason(Some(reason.to_string()));
            appointment.status = status;

            self.ctx.appointment_repo().create(&appointment).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use docbook_core::traits::FixedClock;
    use docbook_core::value_objects::EntityId;
    use docbook_store::MemoryStore;

    use crate::services::context::ServiceContextBuilder;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
    }

    fn ctx() -> ServiceContext {
        ServiceContextBuilder::new()
            .store(Arc::new(MemoryStore::new()))
            .clock(Arc::new(FixedClock::on(today())))
            .build_with_defaults()
    }

    #[tokio::test]
    async fn test_first_run_seeds_demo_data() {
        let ctx = ctx();
        assert_eq!(SeedService::new(&ctx).initialize().await.unwrap(), SeedOutcome::Seeded);

        let users = ctx.user_repo().list().await.unwrap();
        let roles: Vec<Role> = users.iter().map(|u| u.role).collect();
        assert_eq!(
            roles,
            [Role::Patient, Role::Doctor, Role::Doctor, Role::Doctor, Role::Admin]
        );
        assert!(users.iter().all(|u| u.approved));
        assert_eq!(users[1].doctor_profile().unwrap().rating, 4.8);
        assert_eq!(users[1].doctor_profile().unwrap().availability.len(), 30);

        let appointments = ctx.appointment_repo().list().await.unwrap();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[0].status, AppointmentStatus::Confirmed);
        assert_eq!(appointments[0].date, NaiveDate::from_ymd_opt(2030, 1, 14).unwrap());
        assert_eq!(appointments[0].doctor_id, users[1].id);
        assert_eq!(appointments[1].status, AppointmentStatus::Pending);
        assert_eq!(appointments[1].time.to_string(), "14:30");
        assert_eq!(appointments[1].reason.as_deref(), Some("Skin consultation"));
    }

    #[tokio::test]
    async fn test_second_run_is_unchanged() {
        let ctx = ctx();
        let seed = SeedService::new(&ctx);
        seed.initialize().await.unwrap();
        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::Unchanged);
        assert_eq!(ctx.user_repo().list().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_admin_repair() {
        let ctx = ctx();
        let seed = SeedService::new(&ctx);
        seed.initialize().await.unwrap();

        let mut admin = ctx.user_repo().find_by_email("admin@docbook.com").await.unwrap().unwrap();
        admin.email = "admin@example.com".to_string();
        ctx.user_repo().update(&admin).await.unwrap();
        ctx.user_repo().update_password(&admin.id, "stale").await.unwrap();

        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::AdminRepaired);
        let hash = ctx.user_repo().get_password_hash(&admin.id).await.unwrap().unwrap();
        assert!(ctx.password_service().verify("Admin123", &hash).unwrap());

        ctx.user_repo().delete(&admin.id).await.unwrap();
        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::AdminCreated);
        assert!(ctx.user_repo().email_exists("admin@docbook.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_admin_repair_displaces_email_holder() {
        let ctx = ctx();
        let seed = SeedService::new(&ctx);
        seed.initialize().await.unwrap();

        let mut admin = ctx.user_repo().find_by_email("admin@docbook.com").await.unwrap().unwrap();
        admin.email = "boss@docbook.com".to_string();
        ctx.user_repo().update(&admin).await.unwrap();

        let holder = User::new(
            EntityId::new("holder"),
            "Squatter".to_string(),
            "admin@docbook.com".to_string(),
            Role::Patient,
        );
        ctx.user_repo().create(&holder, "hash").await.unwrap();

        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::AdminRepaired);

        let restored = ctx.user_repo().find_by_email("admin@docbook.com").await.unwrap().unwrap();
        assert_eq!(restored.id, admin.id);
        assert_eq!(restored.role, Role::Admin);
        let moved = ctx.user_repo().find_by_id(&holder.id).await.unwrap().unwrap();
        assert_eq!(moved.email, "displaced-holder@docbook.invalid");
        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::Unchanged);

        ctx.user_repo().delete(&admin.id).await.unwrap();
        ctx.user_repo().update(&User { email: "admin@docbook.com".to_string(), ..moved }).await.unwrap();
        assert_eq!(seed.initialize().await.unwrap(), SeedOutcome::AdminCreated);
        let created = ctx.user_repo().find_by_email("admin@docbook.com").await.unwrap().unwrap();
        assert_eq!(created.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_reset_requires_admin() {
        let ctx = ctx();
        let seed = SeedService::new(&ctx);
        seed.initialize().await.unwrap();
        ctx.appointment_repo().delete_by_participant(&ctx.user_repo().list().await.unwrap()[0].id).await.unwrap();

        let patient = Actor::new(EntityId::new("p"), Role::Patient);
        assert!(seed.reset(&patient).await.is_err());

        let admin = Actor::new(EntityId::new("a"), Role::Admin);
        assert_eq!(seed.reset(&admin).await.unwrap(), SeedOutcome::Seeded);
        assert_eq!(ctx.appointment_repo().list().await.unwrap().len(), 2);
    }
}

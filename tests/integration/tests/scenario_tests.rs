//! End-to-end scenarios over the service layer
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use chrono::Days;
use docbook_common::AppError;
use docbook_core::entities::{AppointmentStatus, Role};
use docbook_core::error::DomainError;
use docbook_core::value_objects::DayOfWeek;
use docbook_service::dto::{DoctorQuery, RescheduleRequest};
use docbook_service::{
    AppointmentService, AvailabilityService, BackupService, IdentityService, SearchService,
    SeedOutcome, SeedService, ServiceError, Session, SessionService, StatsService,
};
use integration_tests::*;

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_double_booking_is_rejected() {
    let clinic = TestClinic::seeded().await.unwrap();
    let patient = clinic.login(PATIENT_EMAIL, DEMO_PASSWORD).await.unwrap();
    let doctor = clinic.login(DOCTOR_EMAIL, DEMO_PASSWORD).await.unwrap();
    let appointments = AppointmentService::new(&clinic.ctx);

    let request = booking(&doctor.user().id, test_today(), "09:00");
    appointments.book(&patient.actor(), request.clone()).await.unwrap();

    let other = IdentityService::new(&clinic.ctx)
        .register(patient_registration())
        .await
        .unwrap();
    let err = appointments
        .book(&Session::new(other).actor(), request)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::SlotUnavailable { .. })));
}

#[tokio::test]
async fn test_seeded_confirmed_slot_is_taken() {
    let clinic = TestClinic::seeded().await.unwrap();
    let doctor = clinic.login(DOCTOR_EMAIL, DEMO_PASSWORD).await.unwrap();
    let availability = AvailabilityService::new(&clinic.ctx);

    let in_a_week = test_today() + Days::new(7);
    assert!(!availability
        .is_slot_available(&doctor.user().id, in_a_week, slot("10:00"))
        .await
        .unwrap());
    assert!(availability
        .is_slot_available(&doctor.user().id, in_a_week, slot("11:00"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_full_lifecycle_through_dashboards() {
    let clinic = TestClinic::seeded().await.unwrap();
    let patient = clinic.login(PATIENT_EMAIL, DEMO_PASSWORD).await.unwrap();
    let doctor = clinic.login(DOCTOR_EMAIL, DEMO_PASSWORD).await.unwrap();
    let appointments = AppointmentService::new(&clinic.ctx);

    let tomorrow = test_today() + Days::new(1);
    let apt = appointments
        .book(&patient.actor(), booking(&doctor.user().id, tomorrow, "14:00"))
        .await
        .unwrap();

    let upcoming = appointments
        .list_upcoming(&doctor.user().id, Role::Doctor)
        .await
        .unwrap();
    assert!(upcoming.iter().any(|a| a.id == apt.id));

    appointments.approve(&doctor.actor(), &apt.id).await.unwrap();
    let completed = appointments.complete(&doctor.actor(), &apt.id).await.unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    let history = appointments
        .list_history(&patient.user().id, Role::Patient)
        .await
        .unwrap();
    assert_eq!(history.iter().map(|a| &a.id).collect::<Vec<_>>(), [&apt.id]);

    let details = appointments.detailed(&history).await.unwrap();
    assert_eq!(details[0].doctor_name, "Dr. Sarah Wilson");
    assert_eq!(details[0].patient_name, "John Patient");
}

#[tokio::test]
async fn test_upcoming_history_partition() {
    let clinic = TestClinic::seeded().await.unwrap();
    let patient = clinic.login(PATIENT_EMAIL, DEMO_PASSWORD).await.unwrap();
    let doctor = clinic.login(DOCTOR2_EMAIL, DEMO_PASSWORD).await.unwrap();
    let appointments = AppointmentService::new(&clinic.ctx);
    let me = patient.user().id.clone();

    let apt = appointments
        .book(&patient.actor(), booking(&doctor.user().id, test_today() + Days::new(1), "11:00"))
        .await
        .unwrap();

    let upcoming = appointments.list_upcoming(&me, Role::Patient).await.unwrap();
    let history = appointments.list_history(&me, Role::Patient).await.unwrap();
    assert_eq!(upcoming.len(), 3, "two seeded plus the new one");
    assert!(history.is_empty());

    appointments.cancel(&patient.actor(), &apt.id).await.unwrap();

    let upcoming = appointments.list_upcoming(&me, Role::Patient).await.unwrap();
    let history = appointments.list_history(&me, Role::Patient).await.unwrap();
    assert!(upcoming.iter().all(|a| a.id != apt.id));
    assert_eq!(history.iter().map(|a| &a.id).collect::<Vec<_>>(), [&apt.id]);
}

#[tokio::test]
async fn test_reschedule_seeded_pending_appointment() {
    let clinic = TestClinic::seeded().await.unwrap();
    let patient = clinic.login(PATIENT_EMAIL, DEMO_PASSWORD).await.unwrap();
    let appointments = AppointmentService::new(&clinic.ctx);

    let all = appointments.list_all().await.unwrap();
    let pending = all
        .iter()
        .find(|a| a.status == AppointmentStatus::Pending)
        .unwrap();
    let confirmed = all
        .iter()
        .find(|a| a.status == AppointmentStatus::Confirmed)
        .unwrap();

    let new_date = test_today() + Days::new(15);
    let moved = appointments
        .reschedule(
            &patient.actor(),
            &pending.id,
            RescheduleRequest { date: new_date, time: slot("09:00") },
        )
        .await
        .unwrap();
    assert_eq!((moved.date, moved.time), (new_date, slot("09:00")));
    assert_eq!(moved.status, AppointmentStatus::Pending);

    let err = appointments
        .reschedule(
            &patient.actor(),
            &confirmed.id,
            RescheduleRequest { date: new_date, time: slot("10:00") },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidTransition { .. })));
}

// ============================================================================
// Identity Tests
// ============================================================================

#[tokio::test]
async fn test_doctor_registration_needs_approval() {
    let clinic = TestClinic::seeded().await.unwrap();
    let identity = IdentityService::new(&clinic.ctx);
    let registration = doctor_registration("Neurology", "Austin, TX");
    let email = registration.email.clone();

    let doctor = identity.register(registration).await.unwrap();
    assert!(!doctor.approved);

    let err = clinic.login(&email, TEST_PASSWORD).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::App(AppError::PendingApproval))
    ));

    let search = SearchService::new(&clinic.ctx);
    assert!(search.search_doctors(&DoctorQuery::text("neuro")).await.unwrap().is_empty());

    let admin = clinic.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    identity.approve_doctor(&admin.actor(), &doctor.id).await.unwrap();

    assert!(clinic.login(&email, TEST_PASSWORD).await.is_ok());
    assert_eq!(search.search_doctors(&DoctorQuery::text("neuro")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_cascades_to_appointments() {
    let clinic = TestClinic::seeded().await.unwrap();
    let admin = clinic.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let doctor = clinic.login(DOCTOR_EMAIL, DEMO_PASSWORD).await.unwrap();
    let appointments = AppointmentService::new(&clinic.ctx);
    let before = appointments.list_all().await.unwrap();

    let removed = IdentityService::new(&clinic.ctx)
        .delete_user(&admin.actor(), &doctor.user().id)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let after = appointments.list_all().await.unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|a| !a.involves(&doctor.user().id)));
}

#[tokio::test]
async fn test_availability_edit_changes_bookable_slots() {
    let clinic = TestClinic::seeded().await.unwrap();
    let doctor = clinic.login(DOCTOR_EMAIL, DEMO_PASSWORD).await.unwrap();
    let availability = AvailabilityService::new(&clinic.ctx);

    let mut template = doctor.user().doctor_profile().unwrap().availability.clone();
    AvailabilityService::toggle_slot(&mut template, DayOfWeek::Monday, slot("17:30"));
    availability
        .save_availability(&doctor.actor(), &doctor.user().id, template)
        .await
        .unwrap();

    let open = availability
        .open_times(&doctor.user().id, test_today())
        .await
        .unwrap();
    assert_eq!(open.last().copied(), Some(slot("17:30")));

    let session = SessionService::new(&clinic.ctx).current().await.unwrap().unwrap();
    let synced = &session.user().doctor_profile().unwrap().availability;
    assert!(synced.is_enabled(DayOfWeek::Monday, slot("17:30")));
}

// ============================================================================
// Seeding & Backup Tests
// ============================================================================

#[tokio::test]
async fn test_seed_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let first = TestClinic::on_disk(dir.path()).await.unwrap();
    assert_eq!(SeedService::new(&first.ctx).initialize().await.unwrap(), SeedOutcome::Seeded);

    let second = TestClinic::on_disk(dir.path()).await.unwrap();
    assert_eq!(
        SeedService::new(&second.ctx).initialize().await.unwrap(),
        SeedOutcome::Unchanged
    );
    let stats = StatsService::new(&second.ctx).system_stats().await.unwrap();
    assert_eq!((stats.total_users, stats.total_appointments), (5, 2));
}

#[tokio::test]
async fn test_reset_on_disk_keeps_exported_backup() {
    let dir = tempfile::tempdir().unwrap();
    let clinic = TestClinic::on_disk(dir.path()).await.unwrap();
    SeedService::new(&clinic.ctx).initialize().await.unwrap();
    let admin = clinic.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let backup = BackupService::new(&clinic.ctx);
    let export = dir.path().join(backup.file_name());
    std::fs::write(&export, backup.export_json(&admin.actor()).await.unwrap()).unwrap();

    assert_eq!(
        SeedService::new(&clinic.ctx).reset(&admin.actor()).await.unwrap(),
        SeedOutcome::Seeded
    );
    assert!(export.exists());
    assert!(SessionService::new(&clinic.ctx).current().await.unwrap().is_none());
}

#[tokio::test]
async fn test_backup_round_trip_between_clinics() {
    let source = TestClinic::seeded().await.unwrap();
    let admin = source.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let json = BackupService::new(&source.ctx)
        .export_json(&admin.actor())
        .await
        .unwrap();

    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["users"].as_array().map(Vec::len), Some(5));
    assert_eq!(document["appointments"][0]["status"], "confirmed");

    let target = TestClinic::start();
    BackupService::new(&target.ctx)
        .import_json(&admin.actor(), &json)
        .await
        .unwrap();

    assert_eq!(
        source.ctx.user_repo().list().await.unwrap(),
        target.ctx.user_repo().list().await.unwrap()
    );
    assert_eq!(
        source.ctx.appointment_repo().list().await.unwrap(),
        target.ctx.appointment_repo().list().await.unwrap()
    );
    assert!(target.login(PATIENT_EMAIL, DEMO_PASSWORD).await.is_ok());
}

//! Integration tests for docbook-store repositories
//!
//! Every test runs against both key-value adapters: the in-memory store and a
//! file store rooted in a temporary directory.

use std::sync::Arc;

use chrono::NaiveDate;

use docbook_core::entities::{
    Appointment, AppointmentStatus, DoctorProfile, Role, User,
};
use docbook_core::error::DomainError;
use docbook_core::traits::{
    AppointmentRepository, KeyValueStore, SessionRepository, UserRepository,
};
use docbook_core::value_objects::{DayOfWeek, EntityId, IdGenerator, SlotTime};
use docbook_store::{
    keys, FileStore, KvAppointmentRepository, KvSessionRepository, KvUserRepository, MemoryStore,
};

/// Both adapters; the TempDir guard must outlive the file store
async fn stores() -> (Vec<Arc<dyn KeyValueStore>>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let file = FileStore::open(dir.path()).await.unwrap();
    (vec![Arc::new(MemoryStore::new()), Arc::new(file)], dir)
}

fn create_test_user(ids: &IdGenerator, role: Role) -> User {
    let id = ids.generate();
    let user = User::new(
        id.clone(),
        format!("User {id}"),
        format!("{id}@example.com"),
        role,
    );
    if role == Role::Doctor {
        user.with_doctor_profile(DoctorProfile::new(
            "Cardiology".to_string(),
            "New York, NY".to_string(),
            String::new(),
        ))
    } else {
        user
    }
}

fn create_test_appointment(ids: &IdGenerator, doctor: &EntityId, patient: &EntityId) -> Appointment {
    Appointment::new(
        ids.generate(),
        doctor.clone(),
        patient.clone(),
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
        SlotTime::parse("10:00").unwrap(),
    )
}

#[tokio::test]
async fn test_user_crud() {
    let (stores, _dir) = stores().await;
    let ids = IdGenerator::new();

    for store in stores {
        let repo = KvUserRepository::new(store);
        let user = create_test_user(&ids, Role::Doctor);

        repo.create(&user, "hash-1").await.unwrap();
        assert!(repo.email_exists(&user.email).await.unwrap());
        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.find_by_email(&user.email).await.unwrap().map(|u| u.id),
            Some(user.id.clone())
        );

        let mut updated = user.clone();
        updated.approved = true;
        updated
            .doctor_profile_mut()
            .unwrap()
            .availability
            .toggle(DayOfWeek::Saturday, SlotTime::parse("12:30").unwrap());
        repo.update(&updated).await.unwrap();

        let stored = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert!(stored.approved);
        assert_eq!(stored.doctor_profile().unwrap().availability.len(), 31);
        assert_eq!(
            repo.get_password_hash(&user.id).await.unwrap().as_deref(),
            Some("hash-1"),
            "update must keep the password hash"
        );

        repo.update_password(&user.id, "hash-2").await.unwrap();
        assert_eq!(
            repo.get_password_hash(&user.id).await.unwrap().as_deref(),
            Some("hash-2")
        );

        assert!(repo.delete(&user.id).await.unwrap());
        assert!(!repo.delete(&user.id).await.unwrap());
        assert_eq!(repo.find_by_id(&user.id).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (stores, _dir) = stores().await;
    let ids = IdGenerator::new();

    for store in stores {
        let repo = KvUserRepository::new(store);
        let first = create_test_user(&ids, Role::Patient);
        let mut second = create_test_user(&ids, Role::Patient);
        repo.create(&first, "h").await.unwrap();
        repo.create(&second, "h").await.unwrap();

        let mut clash = create_test_user(&ids, Role::Patient);
        clash.email = first.email.clone();
        assert!(matches!(
            repo.create(&clash, "h").await,
            Err(DomainError::EmailAlreadyExists)
        ));

        second.email = first.email.clone();
        assert!(matches!(
            repo.update(&second).await,
            Err(DomainError::EmailAlreadyExists)
        ));
    }
}

#[tokio::test]
async fn test_update_unknown_user() {
    let repo = KvUserRepository::new(Arc::new(MemoryStore::new()));
    let ghost = create_test_user(&IdGenerator::new(), Role::Patient);
    assert!(matches!(
        repo.update(&ghost).await,
        Err(DomainError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_list_by_role_preserves_order() {
    let repo = KvUserRepository::new(Arc::new(MemoryStore::new()));
    let ids = IdGenerator::new();
    let d1 = create_test_user(&ids, Role::Doctor);
    let p1 = create_test_user(&ids, Role::Patient);
    let d2 = create_test_user(&ids, Role::Doctor);
    for user in [&d1, &p1, &d2] {
        repo.create(user, "h").await.unwrap();
    }

    let doctors = repo.list_by_role(Role::Doctor).await.unwrap();
    assert_eq!(
        doctors.iter().map(|u| u.id.clone()).collect::<Vec<_>>(),
        vec![d1.id, d2.id]
    );
    assert_eq!(repo.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_appointment_crud_and_cascade() {
    let (stores, _dir) = stores().await;
    let ids = IdGenerator::new();

    for store in stores {
        let repo = KvAppointmentRepository::new(store);
        let doctor = ids.generate();
        let patient = ids.generate();
        let other = ids.generate();

        let a1 = create_test_appointment(&ids, &doctor, &patient);
        let a2 = create_test_appointment(&ids, &other, &doctor);
        let a3 = create_test_appointment(&ids, &other, &patient);
        for apt in [&a1, &a2, &a3] {
            repo.create(apt).await.unwrap();
        }

        assert_eq!(repo.find_by_doctor(&other).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_patient(&patient).await.unwrap().len(), 2);

        let mut confirmed = a1.clone();
        confirmed.status = AppointmentStatus::Confirmed;
        repo.update(&confirmed).await.unwrap();
        assert_eq!(
            repo.find_by_id(&a1.id).await.unwrap().map(|a| a.status),
            Some(AppointmentStatus::Confirmed)
        );

        // `doctor` is the doctor of a1 and the patient of a2
        assert_eq!(repo.delete_by_participant(&doctor).await.unwrap(), 2);
        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, a3.id);

        assert!(repo.delete(&a3.id).await.unwrap());
        assert!(!repo.delete(&a3.id).await.unwrap());
    }
}

#[tokio::test]
async fn test_session_snapshot_has_no_hash() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let sessions = KvSessionRepository::new(Arc::clone(&store));
    let user = create_test_user(&IdGenerator::new(), Role::Doctor);

    assert_eq!(sessions.load().await.unwrap(), None);
    sessions.save(&user).await.unwrap();

    let raw = store.get(keys::CURRENT_USER).await.unwrap().unwrap();
    assert!(!raw.contains("passwordHash"));
    assert_eq!(sessions.load().await.unwrap(), Some(user));

    sessions.clear().await.unwrap();
    assert_eq!(sessions.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_collection_surfaces_error() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set(keys::USERS, "[{\"id\": 1}]").await.unwrap();

    let repo = KvUserRepository::new(store);
    assert!(matches!(
        repo.list().await,
        Err(DomainError::CorruptRecord { collection: "docbook_users", .. })
    ));
}

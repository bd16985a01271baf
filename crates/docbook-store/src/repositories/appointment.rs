//! Key-value implementation of AppointmentRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use docbook_core::entities::Appointment;
use docbook_core::error::DomainError;
use docbook_core::traits::{AppointmentRepository, KeyValueStore, RepoResult};
use docbook_core::value_objects::EntityId;

use crate::kv::{get_collection, keys, set_collection};
use crate::models::AppointmentRecord;

use super::error::appointment_not_found;

/// AppointmentRepository over the `docbook_appointments` collection
#[derive(Clone)]
pub struct KvAppointmentRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvAppointmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> RepoResult<Vec<AppointmentRecord>> {
        get_collection(self.store.as_ref(), keys::APPOINTMENTS).await
    }

    async fn save(&self, records: &[AppointmentRecord]) -> RepoResult<()> {
        set_collection(self.store.as_ref(), keys::APPOINTMENTS, records).await
    }

    async fn filtered<F>(&self, predicate: F) -> RepoResult<Vec<Appointment>>
    where
        F: Fn(&AppointmentRecord) -> bool + Send,
    {
        self.load()
            .await?
            .iter()
            .filter(|r| predicate(r))
            .map(Appointment::try_from)
            .collect()
    }
}

#[async_trait]
impl AppointmentRepository for KvAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Appointment>> {
        self.load()
            .await?
            .iter()
            .find(|r| r.id == id.as_str())
            .map(Appointment::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Appointment>> {
        self.filtered(|_| true).await
    }

    #[instrument(skip(self))]
    async fn find_by_doctor(&self, doctor_id: &EntityId) -> RepoResult<Vec<Appointment>> {
        self.filtered(|r| r.doctor_id == doctor_id.as_str()).await
    }

    #[instrument(skip(self))]
    async fn find_by_patient(&self, patient_id: &EntityId) -> RepoResult<Vec<Appointment>> {
        self.filtered(|r| r.patient_id == patient_id.as_str()).await
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn create(&self, appointment: &Appointment) -> RepoResult<()> {
        let mut records = self.load().await?;
        if records.iter().any(|r| r.id == appointment.id.as_str()) {
            return Err(DomainError::InternalError(format!(
                "Duplicate appointment id {}",
                appointment.id
            )));
        }

        records.push(AppointmentRecord::from(appointment));
        self.save(&records).await?;

        debug!(total = records.len(), "Appointment inserted");
        Ok(())
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn update(&self, appointment: &Appointment) -> RepoResult<()> {
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == appointment.id.as_str())
            .ok_or_else(|| appointment_not_found(&appointment.id))?;
        *record = AppointmentRecord::from(appointment);

        self.save(&records).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &EntityId) -> RepoResult<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id.as_str());
        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete_by_participant(&self, user_id: &EntityId) -> RepoResult<u64> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.doctor_id != user_id.as_str() && r.patient_id != user_id.as_str());
        let removed = (before - records.len()) as u64;

        if removed > 0 {
            self.save(&records).await?;
            debug!(removed, "Cascaded appointment deletion");
        }
        Ok(removed)
    }
}

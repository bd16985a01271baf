//! Whole-database snapshot for export and import
//!
//! The snapshot carries raw records so that ids, field values and order
//! survive a round trip untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use docbook_core::entities::{Appointment, User};
use docbook_core::error::DomainError;
use docbook_core::traits::{KeyValueStore, RepoResult};

use crate::kv::{get_collection, keys, set_collection};
use crate::mappers::DATE_FORMAT;
use crate::models::{AppointmentRecord, UserRecord};
use crate::repositories::map_serialize_error;

/// Exported users and appointments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub users: Vec<UserRecord>,
    pub appointments: Vec<AppointmentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Read both collections from the store
    #[instrument(skip(store))]
    pub async fn capture(store: &dyn KeyValueStore, now: DateTime<Utc>) -> RepoResult<Self> {
        Ok(Self {
            users: get_collection(store, keys::USERS).await?,
            appointments: get_collection(store, keys::APPOINTMENTS).await?,
            export_date: Some(now),
        })
    }

    /// Overwrite both collections with this snapshot
    #[instrument(skip(self, store), fields(users = self.users.len(), appointments = self.appointments.len()))]
    pub async fn restore(&self, store: &dyn KeyValueStore) -> RepoResult<()> {
        self.validate()?;
        set_collection(store, keys::USERS, &self.users).await?;
        set_collection(store, keys::APPOINTMENTS, &self.appointments).await?;
        info!("Snapshot restored");
        Ok(())
    }

    /// Check that every record maps to an entity
    pub fn validate(&self) -> RepoResult<()> {
        for record in &self.users {
            User::try_from(record)?;
        }
        for record in &self.appointments {
            Appointment::try_from(record)?;
        }
        Ok(())
    }

    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> RepoResult<String> {
        serde_json::to_string_pretty(self).map_err(map_serialize_error)
    }

    /// Parse a backup document; both `users` and `appointments` are required
    pub fn from_json(text: &str) -> RepoResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| DomainError::ValidationError(format!("Invalid backup file: {e}")))
    }

    /// `docbook-backup-YYYY-MM-DD.json`
    pub fn file_name(date: NaiveDate) -> String {
        format!("docbook-backup-{}.json", date.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Snapshot::file_name(date), "docbook-backup-2024-03-09.json");
    }

    #[test]
    fn test_missing_collection_is_rejected() {
        let err = Snapshot::from_json(r#"{"users": []}"#).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(msg) if msg.contains("appointments")));

        assert!(Snapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_export_date_is_optional_on_import() {
        let snapshot = Snapshot::from_json(r#"{"users": [], "appointments": []}"#).unwrap();
        assert!(snapshot.export_date.is_none());
    }

    #[tokio::test]
    async fn test_capture_and_restore() {
        let source = MemoryStore::new();
        source
            .set(
                keys::APPOINTMENTS,
                r#"[{"id":"a1","doctorId":"d","patientId":"p","date":"2030-01-01","time":"10:00","status":"pending","createdAt":"2029-12-01T00:00:00Z"}]"#,
            )
            .await
            .unwrap();

        let snapshot = Snapshot::capture(&source, Utc::now()).await.unwrap();
        assert!(snapshot.users.is_empty());
        assert_eq!(snapshot.appointments.len(), 1);

        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"exportDate\""));

        let target = MemoryStore::new();
        Snapshot::from_json(&json).unwrap().restore(&target).await.unwrap();
        let restored = Snapshot::capture(&target, Utc::now()).await.unwrap();
        assert_eq!(restored.appointments, snapshot.appointments);
    }

    #[tokio::test]
    async fn test_restore_rejects_corrupt_records() {
        let snapshot = Snapshot::from_json(
            r#"{"users": [], "appointments": [{"id":"a1","doctorId":"d","patientId":"p","date":"soon","time":"10:00","status":"pending","createdAt":"2029-12-01T00:00:00Z"}]}"#,
        )
        .unwrap();

        let store = MemoryStore::new();
        assert!(snapshot.restore(&store).await.is_err());
        assert_eq!(store.get(keys::APPOINTMENTS).await.unwrap(), None);
    }
}

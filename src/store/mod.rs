//! Storage contracts and backend selection.
//!
//! # Responsibility
//! - Define one repository interface per entity.
//! - Open the backend chosen by configuration behind a single trait object.
//!
//! # Invariants
//! - Natural keys are unique: creating an employee whose CPF exists, or an
//!   item whose CA exists, returns the stored record with `created == false`.
//! - Callers pass CPFs already normalized to digits.
//! - Listings are in id order, which is insertion order.

pub mod snapshot;

use crate::db::store::SqliteStore;
use crate::libs::delivery::{DeliveryBundle, DeliveryReceipt, DeliveryRecord, NewDelivery};
use crate::libs::employee::{Employee, NewEmployee};
use crate::libs::error::RegistryResult;
use crate::libs::item::{NewItem, ProtectiveItem};
use serde::{Deserialize, Serialize};
use snapshot::SnapshotStore;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of an insert-if-absent keyed by a natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted<T> {
    pub record: T,
    pub created: bool,
}

impl<T> Upserted<T> {
    pub fn created(record: T) -> Self {
        Self { record, created: true }
    }

    pub fn existing(record: T) -> Self {
        Self { record, created: false }
    }
}

pub trait EmployeeStore {
    /// All employees, optionally restricted to names containing `name_filter`.
    fn list_employees(&self, name_filter: Option<&str>) -> RegistryResult<Vec<Employee>>;
    fn employee_by_id(&self, id: i64) -> RegistryResult<Option<Employee>>;
    fn employee_by_national_id(&self, national_id: &str) -> RegistryResult<Option<Employee>>;
    fn upsert_employee(&self, employee: &NewEmployee) -> RegistryResult<Upserted<Employee>>;
}

pub trait ItemStore {
    fn list_items(&self) -> RegistryResult<Vec<ProtectiveItem>>;
    fn item_by_id(&self, id: i64) -> RegistryResult<Option<ProtectiveItem>>;
    fn item_by_certification_code(&self, code: &str) -> RegistryResult<Option<ProtectiveItem>>;
    fn upsert_item(&self, item: &NewItem) -> RegistryResult<Upserted<ProtectiveItem>>;
}

pub trait DeliveryStore {
    fn list_deliveries(&self) -> RegistryResult<Vec<DeliveryRecord>>;
    fn delivery_by_id(&self, id: i64) -> RegistryResult<Option<DeliveryRecord>>;
    fn deliveries_for_employee(&self, employee_id: i64) -> RegistryResult<Vec<DeliveryRecord>>;
    /// Stores a record referencing existing ids.
    fn record_delivery(&self, delivery: &NewDelivery) -> RegistryResult<DeliveryRecord>;
    /// Resolves or creates the employee and the item, then stores the record,
    /// as one unit.
    fn register_delivery(&self, bundle: &DeliveryBundle) -> RegistryResult<DeliveryReceipt>;
}

/// A complete backend.
pub trait Store: EmployeeStore + ItemStore + DeliveryStore + Send + Sync {
    fn backend(&self) -> StorageBackend;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Transactional SQLite database.
    #[default]
    Sqlite,
    /// One JSON array file per entity, rewritten on every change.
    Snapshot,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "relational" => Ok(Self::Sqlite),
            "snapshot" | "json" | "file" => Ok(Self::Snapshot),
            _ => Err(value.to_string()),
        }
    }
}

/// Opens the configured backend inside `data_dir`.
pub fn open_store(backend: StorageBackend, data_dir: &Path) -> RegistryResult<Arc<dyn Store>> {
    std::fs::create_dir_all(data_dir)?;
    let store: Arc<dyn Store> = match backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open_in_dir(data_dir)?),
        StorageBackend::Snapshot => Arc::new(SnapshotStore::open(data_dir)?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::StorageBackend;

    #[test]
    fn backend_names_round_trip_through_display() {
        for backend in [StorageBackend::Sqlite, StorageBackend::Snapshot] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
        assert_eq!("JSON".parse::<StorageBackend>().unwrap(), StorageBackend::Snapshot);
        assert!("postgres".parse::<StorageBackend>().is_err());
    }
}

//! Registry use-case service.
//!
//! # Responsibility
//! - Turn raw drafts into validated inputs and hand them to the store.
//! - Turn absent lookups into `NotFound` errors.
//!
//! # Invariants
//! - CPFs are normalized here, before any store sees them.
//! - The service is storage-agnostic; the backend is a `Store` trait object.

use crate::libs::delivery::{DeliveryBundle, DeliveryBundleDraft, DeliveryDraft, DeliveryReceipt, DeliveryRecord, NewDelivery};
use crate::libs::employee::{Employee, EmployeeDraft, NewEmployee};
use crate::libs::error::{RegistryError, RegistryResult};
use crate::libs::identity::normalize_national_id;
use crate::libs::item::{ItemDraft, NewItem, ProtectiveItem};
use crate::libs::messages::Message;
use crate::store::{StorageBackend, Store, Upserted};
use std::sync::Arc;

#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn Store>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> StorageBackend {
        self.store.backend()
    }

    /// Lists employees; a blank filter lists everyone.
    pub fn list_employees(&self, name_filter: Option<&str>) -> RegistryResult<Vec<Employee>> {
        let name_filter = name_filter.map(str::trim).filter(|needle| !needle.is_empty());
        self.store.list_employees(name_filter)
    }

    pub fn employee(&self, id: i64) -> RegistryResult<Employee> {
        self.store
            .employee_by_id(id)?
            .ok_or_else(|| RegistryError::NotFound(Message::EmployeeNotFound(id.to_string())))
    }

    /// Looks an employee up by CPF in any punctuation.
    pub fn employee_by_national_id(&self, national_id: &str) -> RegistryResult<Employee> {
        let normalized = normalize_national_id(national_id);
        if normalized.is_empty() {
            return Err(RegistryError::NotFound(Message::EmployeeNotFound(national_id.to_string())));
        }
        self.store
            .employee_by_national_id(&normalized)?
            .ok_or(RegistryError::NotFound(Message::EmployeeNotFound(normalized)))
    }

    /// Registers an employee, or returns the one already holding the CPF.
    pub fn create_employee(&self, draft: &EmployeeDraft) -> RegistryResult<Upserted<Employee>> {
        let employee = NewEmployee::try_from(draft)?;
        let upserted = self.store.upsert_employee(&employee)?;

        if upserted.created {
            tracing::info!(id = upserted.record.id, "{}", Message::EmployeeCreated(upserted.record.id));
        } else {
            tracing::debug!(id = upserted.record.id, "{}", Message::EmployeeAlreadyRegistered(upserted.record.id));
        }
        Ok(upserted)
    }

    pub fn list_items(&self) -> RegistryResult<Vec<ProtectiveItem>> {
        self.store.list_items()
    }

    pub fn item(&self, id: i64) -> RegistryResult<ProtectiveItem> {
        self.store
            .item_by_id(id)?
            .ok_or_else(|| RegistryError::NotFound(Message::ItemNotFound(id.to_string())))
    }

    pub fn item_by_certification_code(&self, code: &str) -> RegistryResult<ProtectiveItem> {
        let code = code.trim();
        self.store
            .item_by_certification_code(code)?
            .ok_or_else(|| RegistryError::NotFound(Message::ItemNotFound(code.to_string())))
    }

    /// Catalogs an item, or returns the one already holding the CA.
    pub fn create_item(&self, draft: &ItemDraft) -> RegistryResult<Upserted<ProtectiveItem>> {
        let item = NewItem::try_from(draft)?;
        let upserted = self.store.upsert_item(&item)?;

        if upserted.created {
            tracing::info!(id = upserted.record.id, "{}", Message::ItemCreated(upserted.record.id));
        } else {
            tracing::debug!(id = upserted.record.id, "{}", Message::ItemAlreadyRegistered(upserted.record.id));
        }
        Ok(upserted)
    }

    pub fn list_deliveries(&self) -> RegistryResult<Vec<DeliveryRecord>> {
        self.store.list_deliveries()
    }

    pub fn delivery(&self, id: i64) -> RegistryResult<DeliveryRecord> {
        self.store
            .delivery_by_id(id)?
            .ok_or(RegistryError::NotFound(Message::DeliveryNotFound(id)))
    }

    pub fn deliveries_for_employee(&self, employee_id: i64) -> RegistryResult<Vec<DeliveryRecord>> {
        self.store.deliveries_for_employee(employee_id)
    }

    /// Stores a delivery that references an existing employee and item by id.
    pub fn record_delivery(&self, draft: &DeliveryDraft) -> RegistryResult<DeliveryRecord> {
        let delivery = NewDelivery::try_from(draft)?;
        let record = self.store.record_delivery(&delivery)?;

        tracing::info!(id = record.id, employee_id = record.employee_id, item_id = record.item_id, "{}", Message::DeliveryRecorded(record.id));
        Ok(record)
    }

    /// Stores a delivery together with its employee and item, creating
    /// whichever of the two is not registered yet.
    pub fn register_delivery(&self, draft: &DeliveryBundleDraft) -> RegistryResult<DeliveryReceipt> {
        let bundle = DeliveryBundle::try_from(draft)?;
        let receipt = self.store.register_delivery(&bundle)?;

        tracing::info!(
            id = receipt.id,
            employee_id = receipt.employee.id,
            employee_created = receipt.employee_created,
            item_id = receipt.item.id,
            item_created = receipt.item_created,
            "{}",
            Message::DeliveryRecorded(receipt.id)
        );
        Ok(receipt)
    }
}

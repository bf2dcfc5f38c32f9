//! Relational backend: the store traits over one SQLite connection.

use super::db::{Db, DB_FILE_NAME};
use super::deliveries::Deliveries;
use super::employees::Employees;
use super::items::Items;
use crate::libs::delivery::{DeliveryBundle, DeliveryReceipt, DeliveryRecord, NewDelivery};
use crate::libs::employee::{Employee, NewEmployee};
use crate::libs::error::{RegistryError, RegistryResult};
use crate::libs::item::{NewItem, ProtectiveItem};
use crate::libs::messages::Message;
use crate::store::{DeliveryStore, EmployeeStore, ItemStore, StorageBackend, Store, Upserted};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> RegistryResult<Self> {
        let db = Db::open(path)?;
        Ok(Self { conn: Mutex::new(db.conn) })
    }

    pub fn open_in_dir(data_dir: &Path) -> RegistryResult<Self> {
        Self::open(&data_dir.join(DB_FILE_NAME))
    }

    pub fn in_memory() -> RegistryResult<Self> {
        let db = Db::open_in_memory()?;
        Ok(Self { conn: Mutex::new(db.conn) })
    }
}

impl EmployeeStore for SqliteStore {
    fn list_employees(&self, name_filter: Option<&str>) -> RegistryResult<Vec<Employee>> {
        let conn = self.conn.lock();
        Ok(Employees::new(&conn).list(name_filter)?)
    }

    fn employee_by_id(&self, id: i64) -> RegistryResult<Option<Employee>> {
        let conn = self.conn.lock();
        Ok(Employees::new(&conn).get_by_id(id)?)
    }

    fn employee_by_national_id(&self, national_id: &str) -> RegistryResult<Option<Employee>> {
        let conn = self.conn.lock();
        Ok(Employees::new(&conn).get_by_national_id(national_id)?)
    }

    fn upsert_employee(&self, employee: &NewEmployee) -> RegistryResult<Upserted<Employee>> {
        let conn = self.conn.lock();
        Ok(Employees::new(&conn).insert_if_absent(employee, Utc::now())?)
    }
}

impl ItemStore for SqliteStore {
    fn list_items(&self) -> RegistryResult<Vec<ProtectiveItem>> {
        let conn = self.conn.lock();
        Ok(Items::new(&conn).list()?)
    }

    fn item_by_id(&self, id: i64) -> RegistryResult<Option<ProtectiveItem>> {
        let conn = self.conn.lock();
        Ok(Items::new(&conn).get_by_id(id)?)
    }

    fn item_by_certification_code(&self, code: &str) -> RegistryResult<Option<ProtectiveItem>> {
        let conn = self.conn.lock();
        Ok(Items::new(&conn).get_by_certification_code(code)?)
    }

    fn upsert_item(&self, item: &NewItem) -> RegistryResult<Upserted<ProtectiveItem>> {
        let conn = self.conn.lock();
        Ok(Items::new(&conn).insert_if_absent(item, Utc::now())?)
    }
}

impl DeliveryStore for SqliteStore {
    fn list_deliveries(&self) -> RegistryResult<Vec<DeliveryRecord>> {
        let conn = self.conn.lock();
        Ok(Deliveries::new(&conn).list()?)
    }

    fn delivery_by_id(&self, id: i64) -> RegistryResult<Option<DeliveryRecord>> {
        let conn = self.conn.lock();
        Ok(Deliveries::new(&conn).get_by_id(id)?)
    }

    fn deliveries_for_employee(&self, employee_id: i64) -> RegistryResult<Vec<DeliveryRecord>> {
        let conn = self.conn.lock();
        Ok(Deliveries::new(&conn).list_by_employee(employee_id)?)
    }

    fn record_delivery(&self, delivery: &NewDelivery) -> RegistryResult<DeliveryRecord> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        if Employees::new(&tx).get_by_id(delivery.employee_id)?.is_none() {
            return Err(RegistryError::NotFound(Message::ReferencedEmployeeMissing(delivery.employee_id)));
        }
        if Items::new(&tx).get_by_id(delivery.item_id)?.is_none() {
            return Err(RegistryError::NotFound(Message::ReferencedItemMissing(delivery.item_id)));
        }

        let record = Deliveries::new(&tx).insert(delivery.employee_id, delivery.item_id, &delivery.details, Utc::now())?;
        tx.commit()?;

        Ok(record)
    }

    fn register_delivery(&self, bundle: &DeliveryBundle) -> RegistryResult<DeliveryReceipt> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let now = Utc::now();

        // Ids minted here are visible to the record insert before commit
        let employee = Employees::new(&tx).insert_if_absent(&bundle.employee, now)?;
        let item = Items::new(&tx).insert_if_absent(&bundle.item, now)?;
        let record = Deliveries::new(&tx).insert(employee.record.id, item.record.id, &bundle.details, now)?;

        tx.commit()?;

        Ok(DeliveryReceipt::new(&record, employee.record, employee.created, item.record, item.created))
    }
}

impl Store for SqliteStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Sqlite
    }
}

//! File-snapshot backend: one JSON array file per entity.
//!
//! # Responsibility
//! - Keep every entity type as a full JSON array in its own file.
//! - Load the whole array on every read and rewrite it on every change.
//!
//! # Invariants
//! - Each file is guarded by its own mutex for the whole load/modify/save
//!   sequence, so writers in one process never lose updates.
//! - Ids come from a per-file counter seeded from the highest id on disk when
//!   the store opens; the directory must have a single writing process.
//! - Writes go to a sibling temp file renamed over the original, so a crash
//!   mid-write leaves the previous snapshot intact.
//! - Flat delivery creation does not check that the referenced employee and
//!   item exist.

use crate::libs::delivery::{DeliveryBundle, DeliveryDetails, DeliveryReceipt, DeliveryRecord, NewDelivery};
use crate::libs::employee::{Employee, NewEmployee};
use crate::libs::error::RegistryResult;
use crate::libs::identity::name_matches;
use crate::libs::item::{NewItem, ProtectiveItem};
use crate::libs::messages::Message;
use crate::msg_debug;
use crate::store::{DeliveryStore, EmployeeStore, ItemStore, StorageBackend, Store, Upserted};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub const EMPLOYEES_FILE: &str = "colaboradores.json";
pub const ITEMS_FILE: &str = "epis.json";
pub const DELIVERIES_FILE: &str = "registros.json";

/// Rows that carry a store-assigned id.
trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Employee {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for ProtectiveItem {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for DeliveryRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A JSON array file plus its id counter.
struct SnapshotFile<T> {
    path: PathBuf,
    next_id: i64,
    _rows: PhantomData<fn() -> T>,
}

impl<T> SnapshotFile<T>
where
    T: Identified + Serialize + DeserializeOwned,
{
    fn open(path: PathBuf) -> RegistryResult<Self> {
        if !path.exists() {
            fs::write(&path, "[]")?;
            msg_debug!(Message::SnapshotFileCreated(path.display().to_string()));
        }

        let mut file = Self {
            path,
            next_id: 1,
            _rows: PhantomData,
        };
        file.next_id = file.load()?.iter().map(Identified::id).max().map_or(1, |max| max + 1);

        Ok(file)
    }

    fn load(&self) -> RegistryResult<Vec<T>> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, rows: &[T]) -> RegistryResult<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(rows)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find_by_id(&self, id: i64) -> RegistryResult<Option<T>> {
        Ok(self.load()?.into_iter().find(|row| row.id() == id))
    }
}

pub struct SnapshotStore {
    employees: Mutex<SnapshotFile<Employee>>,
    items: Mutex<SnapshotFile<ProtectiveItem>>,
    deliveries: Mutex<SnapshotFile<DeliveryRecord>>,
}

impl SnapshotStore {
    /// Opens the three snapshot files in `dir`, creating empty ones as needed.
    pub fn open(dir: &Path) -> RegistryResult<Self> {
        fs::create_dir_all(dir)?;

        Ok(Self {
            employees: Mutex::new(SnapshotFile::open(dir.join(EMPLOYEES_FILE))?),
            items: Mutex::new(SnapshotFile::open(dir.join(ITEMS_FILE))?),
            deliveries: Mutex::new(SnapshotFile::open(dir.join(DELIVERIES_FILE))?),
        })
    }
}

fn upsert_employee_into(file: &mut SnapshotFile<Employee>, rows: &mut Vec<Employee>, employee: &NewEmployee, now: DateTime<Utc>) -> Upserted<Employee> {
    if let Some(existing) = rows.iter().find(|e| e.national_id == employee.national_id) {
        return Upserted::existing(existing.clone());
    }

    let created = Employee {
        id: file.allocate_id(),
        full_name: employee.full_name.clone(),
        national_id: employee.national_id.clone(),
        admission_date: employee.admission_date,
        created_at: now,
        updated_at: now,
    };
    rows.push(created.clone());
    Upserted::created(created)
}

fn upsert_item_into(file: &mut SnapshotFile<ProtectiveItem>, rows: &mut Vec<ProtectiveItem>, item: &NewItem, now: DateTime<Utc>) -> Upserted<ProtectiveItem> {
    if let Some(existing) = rows.iter().find(|i| i.certification_code == item.certification_code) {
        return Upserted::existing(existing.clone());
    }

    let created = ProtectiveItem {
        id: file.allocate_id(),
        name: item.name.clone(),
        certification_code: item.certification_code.clone(),
        notes: item.notes.clone(),
        created_at: now,
        updated_at: now,
    };
    rows.push(created.clone());
    Upserted::created(created)
}

fn append_delivery(file: &mut SnapshotFile<DeliveryRecord>, rows: &mut Vec<DeliveryRecord>, employee_id: i64, item_id: i64, details: &DeliveryDetails, now: DateTime<Utc>) -> DeliveryRecord {
    let record = DeliveryRecord {
        id: file.allocate_id(),
        employee_id,
        item_id,
        delivery_date: details.delivery_date,
        signature_data: details.signature_data.clone(),
        notes: details.notes.clone(),
        created_at: now,
        updated_at: now,
    };
    rows.push(record.clone());
    record
}

impl EmployeeStore for SnapshotStore {
    fn list_employees(&self, name_filter: Option<&str>) -> RegistryResult<Vec<Employee>> {
        let employees = self.employees.lock().load()?;
        Ok(match name_filter {
            Some(needle) => employees.into_iter().filter(|e| name_matches(&e.full_name, needle)).collect(),
            None => employees,
        })
    }

    fn employee_by_id(&self, id: i64) -> RegistryResult<Option<Employee>> {
        self.employees.lock().find_by_id(id)
    }

    fn employee_by_national_id(&self, national_id: &str) -> RegistryResult<Option<Employee>> {
        let employees = self.employees.lock().load()?;
        Ok(employees.into_iter().find(|e| e.national_id == national_id))
    }

    fn upsert_employee(&self, employee: &NewEmployee) -> RegistryResult<Upserted<Employee>> {
        let mut file = self.employees.lock();
        let mut rows = file.load()?;

        let upserted = upsert_employee_into(&mut file, &mut rows, employee, Utc::now());
        if upserted.created {
            file.save(&rows)?;
        }
        Ok(upserted)
    }
}

impl ItemStore for SnapshotStore {
    fn list_items(&self) -> RegistryResult<Vec<ProtectiveItem>> {
        self.items.lock().load()
    }

    fn item_by_id(&self, id: i64) -> RegistryResult<Option<ProtectiveItem>> {
        self.items.lock().find_by_id(id)
    }

    fn item_by_certification_code(&self, code: &str) -> RegistryResult<Option<ProtectiveItem>> {
        let items = self.items.lock().load()?;
        Ok(items.into_iter().find(|i| i.certification_code == code))
    }

    fn upsert_item(&self, item: &NewItem) -> RegistryResult<Upserted<ProtectiveItem>> {
        let mut file = self.items.lock();
        let mut rows = file.load()?;

        let upserted = upsert_item_into(&mut file, &mut rows, item, Utc::now());
        if upserted.created {
            file.save(&rows)?;
        }
        Ok(upserted)
    }
}

impl DeliveryStore for SnapshotStore {
    fn list_deliveries(&self) -> RegistryResult<Vec<DeliveryRecord>> {
        self.deliveries.lock().load()
    }

    fn delivery_by_id(&self, id: i64) -> RegistryResult<Option<DeliveryRecord>> {
        self.deliveries.lock().find_by_id(id)
    }

    fn deliveries_for_employee(&self, employee_id: i64) -> RegistryResult<Vec<DeliveryRecord>> {
        let records = self.deliveries.lock().load()?;
        Ok(records.into_iter().filter(|r| r.employee_id == employee_id).collect())
    }

    fn record_delivery(&self, delivery: &NewDelivery) -> RegistryResult<DeliveryRecord> {
        let mut file = self.deliveries.lock();
        let mut rows = file.load()?;

        let record = append_delivery(&mut file, &mut rows, delivery.employee_id, delivery.item_id, &delivery.details, Utc::now());
        file.save(&rows)?;
        Ok(record)
    }

    fn register_delivery(&self, bundle: &DeliveryBundle) -> RegistryResult<DeliveryReceipt> {
        // Lock order: employees, items, deliveries
        let mut employee_file = self.employees.lock();
        let mut item_file = self.items.lock();
        let mut delivery_file = self.deliveries.lock();
        let now = Utc::now();

        let mut employees = employee_file.load()?;
        let mut items = item_file.load()?;
        let mut records = delivery_file.load()?;

        let employee = upsert_employee_into(&mut employee_file, &mut employees, &bundle.employee, now);
        let item = upsert_item_into(&mut item_file, &mut items, &bundle.item, now);
        let record = append_delivery(&mut delivery_file, &mut records, employee.record.id, item.record.id, &bundle.details, now);

        if employee.created {
            employee_file.save(&employees)?;
        }
        if item.created {
            item_file.save(&items)?;
        }
        delivery_file.save(&records)?;

        Ok(DeliveryReceipt::new(&record, employee.record, employee.created, item.record, item.created))
    }
}

impl Store for SnapshotStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Snapshot
    }
}

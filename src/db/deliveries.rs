use crate::libs::delivery::{DeliveryDetails, DeliveryRecord};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_DELIVERY: &str = "INSERT INTO deliveries (employee_id, item_id, delivery_date, signature_data, notes, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const SELECT_DELIVERIES: &str = "SELECT id, employee_id, item_id, delivery_date, signature_data, notes, created_at, updated_at FROM deliveries";

pub struct Deliveries<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Deliveries<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a record; referenced ids are checked by the schema's foreign keys.
    pub fn insert(&self, employee_id: i64, item_id: i64, details: &DeliveryDetails, now: DateTime<Utc>) -> Result<DeliveryRecord> {
        self.conn.execute(
            INSERT_DELIVERY,
            params![employee_id, item_id, details.delivery_date, details.signature_data, details.notes, now],
        )?;
        let id = self.conn.last_insert_rowid();

        self.conn.query_row(&format!("{} WHERE id = ?1", SELECT_DELIVERIES), params![id], row_to_delivery)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<DeliveryRecord>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_DELIVERIES), params![id], row_to_delivery)
            .optional()
    }

    pub fn list(&self) -> Result<Vec<DeliveryRecord>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_DELIVERIES))?;
        let records = stmt.query_map([], row_to_delivery)?.collect::<Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn list_by_employee(&self, employee_id: i64) -> Result<Vec<DeliveryRecord>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE employee_id = ?1 ORDER BY id", SELECT_DELIVERIES))?;
        let records = stmt.query_map(params![employee_id], row_to_delivery)?.collect::<Result<Vec<_>>>()?;
        Ok(records)
    }
}

fn row_to_delivery(row: &Row) -> Result<DeliveryRecord> {
    Ok(DeliveryRecord {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        item_id: row.get(2)?,
        delivery_date: row.get(3)?,
        signature_data: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

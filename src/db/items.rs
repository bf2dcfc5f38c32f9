use crate::libs::item::{NewItem, ProtectiveItem};
use crate::store::Upserted;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_ITEM: &str = "INSERT INTO protective_items (name, certification_code, notes, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?4)
    ON CONFLICT(certification_code) DO NOTHING";
const SELECT_ITEMS: &str = "SELECT id, name, certification_code, notes, created_at, updated_at FROM protective_items";

pub struct Items<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Items<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts the item unless its certification code is already catalogued.
    pub fn insert_if_absent(&self, item: &NewItem, now: DateTime<Utc>) -> Result<Upserted<ProtectiveItem>> {
        let inserted = self.conn.execute(INSERT_ITEM, params![item.name, item.certification_code, item.notes, now])?;

        let stored = self.conn.query_row(
            &format!("{} WHERE certification_code = ?1", SELECT_ITEMS),
            params![item.certification_code],
            row_to_item,
        )?;

        Ok(if inserted == 1 { Upserted::created(stored) } else { Upserted::existing(stored) })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<ProtectiveItem>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_ITEMS), params![id], row_to_item)
            .optional()
    }

    pub fn get_by_certification_code(&self, code: &str) -> Result<Option<ProtectiveItem>> {
        self.conn
            .query_row(&format!("{} WHERE certification_code = ?1", SELECT_ITEMS), params![code], row_to_item)
            .optional()
    }

    pub fn list(&self) -> Result<Vec<ProtectiveItem>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_ITEMS))?;
        let items = stmt.query_map([], row_to_item)?.collect::<Result<Vec<_>>>()?;
        Ok(items)
    }
}

fn row_to_item(row: &Row) -> Result<ProtectiveItem> {
    Ok(ProtectiveItem {
        id: row.get(0)?,
        name: row.get(1)?,
        certification_code: row.get(2)?,
        notes: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

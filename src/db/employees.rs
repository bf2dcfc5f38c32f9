use crate::libs::employee::{Employee, NewEmployee};
use crate::libs::identity::name_matches;
use crate::store::Upserted;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (full_name, national_id, admission_date, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?4)
    ON CONFLICT(national_id) DO NOTHING";
const SELECT_EMPLOYEES: &str = "SELECT id, full_name, national_id, admission_date, created_at, updated_at FROM employees";
const ORDER_BY_ID: &str = "ORDER BY id";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_NATIONAL_ID: &str = "WHERE national_id = ?1";

/// Employee queries over a connection or an open transaction.
pub struct Employees<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Employees<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts the employee unless its CPF is already registered.
    ///
    /// The UNIQUE constraint decides, so a concurrent writer inserting the
    /// same CPF lands on the "existing" branch instead of failing.
    pub fn insert_if_absent(&self, employee: &NewEmployee, now: DateTime<Utc>) -> Result<Upserted<Employee>> {
        let inserted = self.conn.execute(
            INSERT_EMPLOYEE,
            params![employee.full_name, employee.national_id, employee.admission_date, now],
        )?;

        let stored = self
            .conn
            .query_row(&format!("{} {}", SELECT_EMPLOYEES, WHERE_NATIONAL_ID), params![employee.national_id], row_to_employee)?;

        Ok(if inserted == 1 { Upserted::created(stored) } else { Upserted::existing(stored) })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Employee>> {
        self.conn
            .query_row(&format!("{} {}", SELECT_EMPLOYEES, WHERE_ID), params![id], row_to_employee)
            .optional()
    }

    pub fn get_by_national_id(&self, national_id: &str) -> Result<Option<Employee>> {
        self.conn
            .query_row(&format!("{} {}", SELECT_EMPLOYEES, WHERE_NATIONAL_ID), params![national_id], row_to_employee)
            .optional()
    }

    /// Lists employees in id order, keeping those whose name contains `name_filter`.
    ///
    /// Filtering happens here rather than in SQL because SQLite's `LIKE` only
    /// folds ASCII case, and names carry accents.
    pub fn list(&self, name_filter: Option<&str>) -> Result<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_EMPLOYEES, ORDER_BY_ID))?;
        let employees = stmt.query_map([], row_to_employee)?.collect::<Result<Vec<_>>>()?;

        Ok(match name_filter {
            Some(needle) => employees.into_iter().filter(|e| name_matches(&e.full_name, needle)).collect(),
            None => employees,
        })
    }
}

fn row_to_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        full_name: row.get(1)?,
        national_id: row.get(2)?,
        admission_date: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

//! Relational persistence for ficha-epi, built on SQLite.
//!
//! ## Layout
//!
//! - [`db`]: connection opening and settings (`foreign_keys`, busy timeout)
//! - [`migrations`]: versioned schema, applied when a database is opened
//! - [`employees`], [`items`], [`deliveries`]: per-table queries, usable on a
//!   plain connection or inside a transaction
//! - [`store`]: [`store::SqliteStore`], the relational implementation of the
//!   storage traits
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ficha_epi::db::store::SqliteStore;
//! use ficha_epi::libs::employee::{EmployeeDraft, NewEmployee};
//! use ficha_epi::store::EmployeeStore;
//!
//! let store = SqliteStore::in_memory()?;
//! let employee = NewEmployee::try_from(&EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"))?;
//! let stored = store.upsert_employee(&employee)?;
//! assert!(stored.created);
//! # Ok::<(), ficha_epi::libs::error::RegistryError>(())
//! ```

/// Connection management.
pub mod db;

/// Delivery record queries.
pub mod deliveries;

/// Employee queries, keyed by normalized CPF.
pub mod employees;

/// Protective item queries, keyed by certification code.
pub mod items;

/// Database schema migration system.
pub mod migrations;

/// Store trait implementation.
pub mod store;

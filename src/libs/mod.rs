//! Core library modules for ficha-epi.
//!
//! ## Contents
//!
//! - **Domain**: [`employee`], [`item`], [`delivery`] records and their drafts
//! - **Rules**: [`identity`] (CPF normalization, date parsing, name filter)
//! - **Use cases**: [`registry`], the service every interface talks to
//! - **Infrastructure**: [`config`], [`data_storage`], [`error`], [`messages`], [`app_info`]
//!
//! ```rust,no_run
//! use ficha_epi::libs::employee::EmployeeDraft;
//! use ficha_epi::libs::registry::RegistryService;
//! use ficha_epi::store::{open_store, StorageBackend};
//!
//! let store = open_store(StorageBackend::Snapshot, std::path::Path::new("data"))?;
//! let registry = RegistryService::new(store);
//! let ana = registry.create_employee(&EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"))?;
//! println!("employee #{}", ana.record.id);
//! # Ok::<(), ficha_epi::libs::error::RegistryError>(())
//! ```

pub mod app_info;
pub mod config;
pub mod data_storage;
pub mod delivery;
pub mod employee;
pub mod error;
pub mod identity;
pub mod item;
pub mod messages;
pub mod registry;

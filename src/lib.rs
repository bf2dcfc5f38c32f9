//! # Ficha EPI
//!
//! Records which protective equipment (EPI) each hospital employee received,
//! when, and with which signature.
//!
//! ## Layout
//!
//! - [`libs`]: domain records, validation and the [`libs::registry::RegistryService`]
//! - [`store`]: storage traits and the JSON snapshot backend
//! - [`db`]: the SQLite backend and its schema migrations
//! - [`http`]: the JSON API served by `ficha-epi serve`
//! - [`commands`]: command-line entry points
//!
//! ```rust,no_run
//! use ficha_epi::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod http;
pub mod libs;
pub mod store;

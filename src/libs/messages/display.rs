//! Display implementation for ficha-epi messages.
//!
//! Single place where message text is written. Validation and lookup
//! messages end up verbatim in the `error` field of HTTP responses, so they
//! are phrased for API clients; the rest are console and log lines.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === VALIDATION MESSAGES ===
            Message::MissingField(field) => format!("Incomplete data: '{}' is required", field),
            Message::InvalidDate { field, value } => {
                format!("Invalid date format for '{}': '{}'. Use YYYY-MM-DD", field, value)
            }
            Message::NationalIdWithoutDigits(value) => format!("CPF '{}' contains no digits", value),
            Message::IncompleteDelivery => "Incomplete data: employee, item and record information are required".to_string(),

            // === LOOKUP MESSAGES ===
            Message::EmployeeNotFound(key) => format!("Employee not found: {}", key),
            Message::ItemNotFound(key) => format!("Protective item not found: {}", key),
            Message::DeliveryNotFound(id) => format!("Delivery record not found: {}", id),
            Message::ReferencedEmployeeMissing(id) => format!("Employee not found: {} (referenced by delivery)", id),
            Message::ReferencedItemMissing(id) => format!("Protective item not found: {} (referenced by delivery)", id),

            // === REGISTRY EVENTS ===
            Message::EmployeeCreated(id) => format!("Employee {} registered", id),
            Message::EmployeeAlreadyRegistered(id) => format!("Employee {} already registered, returning existing record", id),
            Message::ItemCreated(id) => format!("Protective item {} registered", id),
            Message::ItemAlreadyRegistered(id) => format!("Protective item {} already registered, returning existing record", id),
            Message::DeliveryRecorded(id) => format!("Delivery record {} stored", id),

            // === STORAGE MESSAGES ===
            Message::StorageOpened(backend, location) => format!("Using {} storage at {}", backend, location),
            Message::SnapshotFileCreated(path) => format!("Created empty data file {}", path),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseNeedsMigration => "Database schema is behind, pending migrations will run on next open".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::MigrationHistoryHeader => "Applied migrations:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => format!("  v{}: {} ({})", version, name, applied_at),
            Message::NoMigrationsApplied => "No migrations applied yet".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigDeleted(path) => format!("Configuration removed: {}", path),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::InvalidBindAddress(addr) => format!("Invalid bind address '{}'", addr),
            Message::InvalidPort(port) => format!("Invalid PORT value '{}'", port),
            Message::UnknownStorageBackend(name) => format!("Unknown storage backend '{}', expected 'sqlite' or 'snapshot'", name),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("HTTP server listening on {}", addr),
            Message::ServerShuttingDown => "Shutting down HTTP server".to_string(),
            Message::ServerSignalListenerFailed(error) => format!("Failed to listen for shutdown signal: {}", error),
        };
        write!(f, "{}", text)
    }
}

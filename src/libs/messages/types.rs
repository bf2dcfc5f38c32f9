/// Every user-facing and log-facing text of the application.
///
/// Variants carry the values interpolated into the final text; the wording
/// itself lives in `display.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === VALIDATION MESSAGES ===
    MissingField(&'static str),
    InvalidDate { field: &'static str, value: String },
    NationalIdWithoutDigits(String),
    IncompleteDelivery,

    // === LOOKUP MESSAGES ===
    EmployeeNotFound(String),
    ItemNotFound(String),
    DeliveryNotFound(i64),
    ReferencedEmployeeMissing(i64),
    ReferencedItemMissing(i64),

    // === REGISTRY EVENTS ===
    EmployeeCreated(i64),
    EmployeeAlreadyRegistered(i64),
    ItemCreated(i64),
    ItemAlreadyRegistered(i64),
    DeliveryRecorded(i64),

    // === STORAGE MESSAGES ===
    StorageOpened(String, String), // backend, location
    SnapshotFileCreated(String),
    DatabaseUpToDate,
    DatabaseVersion(u32),
    DatabaseNeedsMigration,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    MigrationHistoryHeader,
    MigrationHistoryEntry(u32, String, String),
    NoMigrationsApplied,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String),
    ConfigDeleted(String),
    ConfigNotFound,
    InvalidBindAddress(String),
    InvalidPort(String),
    UnknownStorageBackend(String),

    // === SERVER MESSAGES ===
    ServerListening(String),
    ServerShuttingDown,
    ServerSignalListenerFailed(String),
}

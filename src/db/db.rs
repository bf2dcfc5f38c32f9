use super::migrations::init_with_migrations;
use crate::libs::error::RegistryResult;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub const DB_FILE_NAME: &str = "ficha-epi.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (or creates) the database at `path` and applies pending migrations.
    pub fn open(path: &Path) -> RegistryResult<Db> {
        let mut conn = Self::open_without_migrations(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn open_in_memory() -> RegistryResult<Db> {
        let mut conn = Connection::open_in_memory()?;
        configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the database with connection settings applied but the schema untouched.
    pub fn open_without_migrations(path: &Path) -> RegistryResult<Connection> {
        let conn = Connection::open(path)?;
        configure(&conn)?;

        Ok(conn)
    }
}

fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(Duration::from_secs(5))
}

use crate::{
    db::{
        db::{Db, DB_FILE_NAME},
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    /// Show the applied migrations instead of the version summary
    #[arg(long)]
    history: bool,

    /// Data directory holding the database
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let mut config = Config::read()?.with_env_overrides()?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = Some(data_dir);
    }
    let db_path = config.storage.resolve_data_dir()?.join(DB_FILE_NAME);
    let conn = Db::open_without_migrations(&db_path)?;

    if args.history {
        let history = MigrationManager::new().get_migration_history(&conn)?;
        if history.is_empty() {
            msg_info!(Message::NoMigrationsApplied);
            return Ok(());
        }

        msg_print!(Message::MigrationHistoryHeader, true);
        for (version, name, applied_at) in history {
            msg_print!(Message::MigrationHistoryEntry(version, name, applied_at));
        }
        return Ok(());
    }

    msg_print!(Message::DatabaseVersion(get_db_version(&conn)?));
    if needs_migration(&conn)? {
        msg_info!(Message::DatabaseNeedsMigration);
    } else {
        msg_info!(Message::DatabaseUpToDate);
    }
    Ok(())
}

//! Writes or removes `config.json`.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Storage backend to persist in the configuration
    #[arg(long, value_enum)]
    backend: Option<crate::store::StorageBackend>,

    /// Data directory to persist in the configuration
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Listen address to persist in the configuration
    #[arg(long)]
    bind: Option<String>,

    /// Remove the existing configuration instead of writing one
    #[arg(short, long)]
    delete: bool,
}

/// Starts from the current file (or defaults) so repeated runs only change
/// what was passed.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        match Config::delete()? {
            Some(path) => msg_success!(Message::ConfigDeleted(path.display().to_string())),
            None => msg_warning!(Message::ConfigNotFound),
        }
        return Ok(());
    }

    let mut config = Config::read()?;
    if let Some(backend) = init_args.backend {
        config.storage.backend = backend;
    }
    if let Some(data_dir) = init_args.data_dir {
        config.storage.data_dir = Some(data_dir);
    }
    if let Some(bind) = init_args.bind {
        config.server.bind = bind;
    }
    // Fail before writing an address the server could never bind.
    config.server.socket_addr()?;

    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}

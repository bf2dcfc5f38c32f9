//! Runs the HTTP API.
//!
//! Settings come from `config.json`, then the environment, then these flags.

use crate::http;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::registry::RegistryService;
use crate::store::{open_store, StorageBackend};
use crate::{msg_error, msg_info};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:3000
    #[arg(short, long)]
    bind: Option<String>,

    /// Storage backend
    #[arg(long, value_enum)]
    backend: Option<StorageBackend>,

    /// Directory holding the database or the snapshot files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        if let Some(data_dir) = self.data_dir {
            config.storage.data_dir = Some(data_dir);
        }
    }
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let mut config = Config::read()?.with_env_overrides()?;
    args.apply(&mut config);

    let addr = config.server.socket_addr()?;
    let data_dir = config.storage.resolve_data_dir()?;
    let backend = config.storage.backend;

    let store = open_store(backend, &data_dir)?;
    msg_info!(Message::StorageOpened(backend.to_string(), data_dir.display().to_string()));

    let listener = TcpListener::bind(addr).await?;
    msg_info!(Message::ServerListening(listener.local_addr()?.to_string()));

    http::serve(listener, RegistryService::new(store), shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::ServerShuttingDown),
        Err(e) => {
            msg_error!(Message::ServerSignalListenerFailed(e.to_string()));
            // Without a signal listener the server runs until killed.
            std::future::pending::<()>().await
        }
    }
}

#[cfg(test)]
mod tests {
    use ficha_epi::libs::config::{Config, ServerConfig, StorageConfig, DEFAULT_BIND, ENV_DATA_DIR, ENV_PORT, ENV_STORAGE};
    use ficha_epi::store::StorageBackend;
    use parking_lot::{Mutex, MutexGuard};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    /// Points the platform data directory at a temporary home.
    ///
    /// The environment is process-wide, so contexts are handed out one at a time.
    struct ConfigTestContext {
        temp_dir: TempDir,
        _env: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let env = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { temp_dir, _env: env }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.data_dir, None);
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"storage": {"backend": "snapshot"}}"#).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Snapshot);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_invalid_bind_address() {
        let server = ServerConfig {
            bind: "localhost".to_string(),
        };
        assert!(server.socket_addr().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_read_and_delete(ctx: &mut ConfigTestContext) {
        assert_eq!(Config::read().unwrap(), Config::default());

        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Snapshot,
                data_dir: Some(ctx.temp_dir.path().join("data")),
            },
            server: ServerConfig {
                bind: "127.0.0.1:3000".to_string(),
            },
        };
        let path = config.save().unwrap();
        assert!(path.exists());
        assert_eq!(Config::read().unwrap(), config);

        assert_eq!(Config::delete().unwrap(), Some(path.clone()));
        assert!(!path.exists());
        assert_eq!(Config::delete().unwrap(), None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_environment_overrides(ctx: &mut ConfigTestContext) {
        let data_dir = ctx.temp_dir.path().join("env-data");
        std::env::set_var(ENV_PORT, "9090");
        std::env::set_var(ENV_STORAGE, "json");
        std::env::set_var(ENV_DATA_DIR, &data_dir);

        let config = Config::default().with_env_overrides().unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9090");
        assert_eq!(config.storage.backend, StorageBackend::Snapshot);
        assert_eq!(config.storage.data_dir, Some(data_dir.clone()));
        assert_eq!(config.storage.resolve_data_dir().unwrap(), data_dir);
        assert!(data_dir.is_dir());

        std::env::set_var(ENV_PORT, "not-a-port");
        assert!(Config::default().with_env_overrides().is_err());

        std::env::set_var(ENV_PORT, "9090");
        std::env::set_var(ENV_STORAGE, "mongodb");
        assert!(Config::default().with_env_overrides().is_err());

        std::env::remove_var(ENV_PORT);
        std::env::remove_var(ENV_STORAGE);
        std::env::remove_var(ENV_DATA_DIR);
        let config = Config::default().with_env_overrides().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_data_dir_is_platform_directory(_ctx: &mut ConfigTestContext) {
        let storage = StorageConfig {
            backend: StorageBackend::Sqlite,
            data_dir: None,
        };
        let resolved: PathBuf = storage.resolve_data_dir().unwrap();
        assert!(resolved.ends_with("bom-samaritano/ficha-epi"));
        assert!(resolved.is_dir());
    }
}

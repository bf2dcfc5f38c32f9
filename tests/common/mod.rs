#![allow(dead_code)]

use ficha_epi::libs::delivery::{DeliveryBundleDraft, RecordDraft};
use ficha_epi::libs::employee::EmployeeDraft;
use ficha_epi::libs::item::ItemDraft;
use ficha_epi::libs::registry::RegistryService;
use ficha_epi::store::{open_store, StorageBackend};
use tempfile::TempDir;
use test_context::TestContext;

/// One registry per backend, each in its own temporary directory.
pub struct RegistryContext {
    pub temp_dir: TempDir,
    pub registries: Vec<RegistryService>,
}

impl TestContext for RegistryContext {
    fn setup() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let registries = [StorageBackend::Sqlite, StorageBackend::Snapshot]
            .into_iter()
            .map(|backend| {
                let dir = temp_dir.path().join(backend.to_string());
                RegistryService::new(open_store(backend, &dir).unwrap())
            })
            .collect();

        RegistryContext { temp_dir, registries }
    }
}

pub fn record(delivery_date: &str, signature: &str) -> RecordDraft {
    RecordDraft {
        delivery_date: Some(delivery_date.to_string()),
        signature_data: Some(signature.to_string()),
        notes: None,
    }
}

pub fn bundle(employee: EmployeeDraft, item: ItemDraft, record: RecordDraft) -> DeliveryBundleDraft {
    DeliveryBundleDraft {
        employee: Some(employee),
        item: Some(item),
        record: Some(record),
    }
}

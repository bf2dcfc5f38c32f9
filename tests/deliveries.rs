mod common;

#[cfg(test)]
mod tests {
    use super::common::{bundle, record, RegistryContext};
    use chrono::NaiveDate;
    use ficha_epi::libs::delivery::{DeliveryBundleDraft, DeliveryDraft};
    use ficha_epi::libs::employee::EmployeeDraft;
    use ficha_epi::libs::item::ItemDraft;
    use ficha_epi::libs::registry::RegistryService;
    use ficha_epi::store::StorageBackend;
    use std::sync::Barrier;
    use std::thread;
    use test_context::test_context;

    fn counts(registry: &RegistryService) -> (usize, usize, usize) {
        (
            registry.list_employees(None).unwrap().len(),
            registry.list_items().unwrap().len(),
            registry.list_deliveries().unwrap().len(),
        )
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_compound_delivery_creates_missing_parts_once(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let draft = bundle(
                EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"),
                ItemDraft::new("Luva", "12345"),
                record("2024-02-01", "data:image/png;base64,AAAA"),
            );

            let first = registry.register_delivery(&draft).unwrap();
            assert!(first.employee_created);
            assert!(first.item_created);
            assert_eq!(first.employee.national_id, "12345678900");
            assert_eq!(first.delivery_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
            assert_eq!(counts(registry), (1, 1, 1));

            let second = registry.register_delivery(&draft).unwrap();
            assert!(!second.employee_created);
            assert!(!second.item_created);
            assert_eq!(second.employee.id, first.employee.id);
            assert_eq!(second.item.id, first.item.id);
            assert_ne!(second.id, first.id);
            assert_eq!(counts(registry), (1, 1, 2));

            let stored = registry.delivery(second.id).unwrap();
            assert_eq!(stored.employee_id, first.employee.id);
            assert_eq!(stored.item_id, first.item.id);
            assert_eq!(stored.signature_data, "data:image/png;base64,AAAA");
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_compound_delivery_reuses_existing_employee(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let ana = registry
                .create_employee(&EmployeeDraft::new("Ana Silva", "12345678900", "2024-01-10"))
                .unwrap()
                .record;

            let receipt = registry
                .register_delivery(&bundle(
                    EmployeeDraft::new("Ana", "123.456.789-00", "2024-01-10"),
                    ItemDraft::new("Máscara", "CA-9"),
                    record("2024-03-05", "sig"),
                ))
                .unwrap();

            assert!(!receipt.employee_created);
            assert!(receipt.item_created);
            assert_eq!(receipt.employee, ana);
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_incomplete_compound_delivery_creates_nothing(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let draft = DeliveryBundleDraft {
                item: None,
                ..bundle(
                    EmployeeDraft::new("Ana Silva", "12345678900", "2024-01-10"),
                    ItemDraft::new("Luva", "1"),
                    record("2024-02-01", "sig"),
                )
            };
            assert!(registry.register_delivery(&draft).unwrap_err().is_validation());

            let bad_date = bundle(
                EmployeeDraft::new("Ana Silva", "12345678900", "2024-01-10"),
                ItemDraft::new("Luva", "1"),
                record("2024-13-01", "sig"),
            );
            assert!(registry.register_delivery(&bad_date).unwrap_err().is_validation());

            let unsigned = bundle(
                EmployeeDraft::new("Ana Silva", "12345678900", "2024-01-10"),
                ItemDraft::new("Luva", "1"),
                record("2024-02-01", "  "),
            );
            assert!(registry.register_delivery(&unsigned).unwrap_err().is_validation());

            assert_eq!(counts(registry), (0, 0, 0));
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_flat_delivery_and_employee_history(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let ana = registry.create_employee(&EmployeeDraft::new("Ana Silva", "111", "2024-01-10")).unwrap().record;
            let pedro = registry.create_employee(&EmployeeDraft::new("Pedro Lima", "222", "2024-01-10")).unwrap().record;
            let luva = registry.create_item(&ItemDraft::new("Luva", "1")).unwrap().record;

            for (employee_id, date) in [(ana.id, "2024-02-01"), (pedro.id, "2024-02-02"), (ana.id, "2024-02-03")] {
                let draft = DeliveryDraft {
                    employee_id: Some(employee_id),
                    item_id: Some(luva.id),
                    delivery_date: Some(date.to_string()),
                    signature_data: Some("sig".to_string()),
                    notes: Some("troca mensal".to_string()),
                };
                let stored = registry.record_delivery(&draft).unwrap();
                assert_eq!(stored.notes, "troca mensal");
            }

            let history = registry.deliveries_for_employee(ana.id).unwrap();
            let dates: Vec<String> = history.iter().map(|r| r.delivery_date.to_string()).collect();
            assert_eq!(dates, vec!["2024-02-01", "2024-02-03"]);
            assert!(registry.deliveries_for_employee(999).unwrap().is_empty());
            assert_eq!(registry.list_deliveries().unwrap().len(), 3);
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_flat_delivery_requires_references(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let draft = DeliveryDraft {
                employee_id: None,
                item_id: Some(1),
                delivery_date: Some("2024-02-01".to_string()),
                signature_data: Some("sig".to_string()),
                notes: None,
            };
            assert!(registry.record_delivery(&draft).unwrap_err().is_validation());
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_sqlite_rejects_dangling_references(ctx: &mut RegistryContext) {
        let registry = ctx
            .registries
            .iter()
            .find(|r| r.backend() == StorageBackend::Sqlite)
            .unwrap();

        let draft = DeliveryDraft {
            employee_id: Some(10),
            item_id: Some(20),
            delivery_date: Some("2024-02-01".to_string()),
            signature_data: Some("sig".to_string()),
            notes: None,
        };
        assert!(registry.record_delivery(&draft).unwrap_err().is_not_found());
        assert!(registry.list_deliveries().unwrap().is_empty());
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_unknown_delivery_is_not_found(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let err = registry.delivery(7).unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(err.to_string(), "Delivery record not found: 7");
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_concurrent_compound_deliveries_share_new_parts(ctx: &mut RegistryContext) {
        const RACERS: usize = 12;

        for registry in &ctx.registries {
            let draft = bundle(
                EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"),
                ItemDraft::new("Luva", "12345"),
                record("2024-02-01", "sig"),
            );
            let barrier = Barrier::new(RACERS);
            let receipts: Vec<_> = thread::scope(|scope| {
                let handles: Vec<_> = (0..RACERS)
                    .map(|_| {
                        let registry = registry.clone();
                        let (barrier, draft) = (&barrier, &draft);
                        scope.spawn(move || {
                            barrier.wait();
                            registry.register_delivery(draft)
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
            });

            assert_eq!(receipts.iter().filter(|r| r.employee_created).count(), 1);
            assert_eq!(receipts.iter().filter(|r| r.item_created).count(), 1);
            assert!(receipts.iter().all(|r| r.employee.id == receipts[0].employee.id));
            assert!(receipts.iter().all(|r| r.item.id == receipts[0].item.id));

            let mut ids: Vec<i64> = receipts.iter().map(|r| r.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), RACERS);
            assert_eq!(counts(registry), (1, 1, RACERS));
        }
    }
}

mod common;

#[cfg(test)]
mod tests {
    use super::common::RegistryContext;
    use ficha_epi::libs::employee::EmployeeDraft;
    use std::sync::Barrier;
    use std::thread;
    use test_context::test_context;

    #[test_context(RegistryContext)]
    #[test]
    fn test_lookup_ignores_cpf_formatting(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let created = registry
                .create_employee(&EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"))
                .unwrap();
            assert!(created.created);
            assert_eq!(created.record.national_id, "12345678900");

            let plain = registry.employee_by_national_id("12345678900").unwrap();
            let formatted = registry.employee_by_national_id("123.456.789-00").unwrap();
            assert_eq!(plain.id, created.record.id);
            assert_eq!(formatted.id, created.record.id);
            assert_eq!(registry.employee(created.record.id).unwrap(), plain);
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_duplicate_cpf_returns_existing_employee(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let first = registry
                .create_employee(&EmployeeDraft::new("Ana Silva", "123.456.789-00", "2024-01-10"))
                .unwrap();
            let second = registry
                .create_employee(&EmployeeDraft::new("Ana S.", "12345678900", "2023-05-02"))
                .unwrap();

            assert!(!second.created);
            assert_eq!(second.record.id, first.record.id);
            assert_eq!(second.record.full_name, "Ana Silva");
            assert_eq!(registry.list_employees(None).unwrap().len(), 1);
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_name_filter_is_case_insensitive_substring(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            registry.create_employee(&EmployeeDraft::new("Ana Silva", "111", "2024-01-10")).unwrap();
            registry.create_employee(&EmployeeDraft::new("Mariana Costa", "222", "2024-01-11")).unwrap();
            registry.create_employee(&EmployeeDraft::new("Pedro Lima", "333", "2024-01-12")).unwrap();

            let mut names: Vec<String> = registry
                .list_employees(Some("ana"))
                .unwrap()
                .into_iter()
                .map(|e| e.full_name)
                .collect();
            names.sort();
            assert_eq!(names, vec!["Ana Silva", "Mariana Costa"]);

            assert_eq!(registry.list_employees(Some("ANA")).unwrap().len(), 2);
            assert_eq!(registry.list_employees(None).unwrap().len(), 3);
            assert_eq!(registry.list_employees(Some("   ")).unwrap().len(), 3);
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_invalid_admission_date_is_rejected(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let err = registry
                .create_employee(&EmployeeDraft::new("Ana Silva", "12345678900", "2024-13-01"))
                .unwrap_err();
            assert!(err.is_validation());
            assert!(registry.list_employees(None).unwrap().is_empty());

            // Validation runs before the duplicate check.
            registry.create_employee(&EmployeeDraft::new("Ana Silva", "12345678900", "2024-01-10")).unwrap();
            let err = registry
                .create_employee(&EmployeeDraft::new("Ana Silva", "12345678900", "10/01/2024"))
                .unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_missing_fields_are_rejected(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let err = registry.create_employee(&EmployeeDraft::new("  ", "123", "2024-01-10")).unwrap_err();
            assert!(err.is_validation());

            let err = registry.create_employee(&EmployeeDraft::new("Ana", "abc", "2024-01-10")).unwrap_err();
            assert!(err.is_validation());

            let err = registry.create_employee(&EmployeeDraft::default()).unwrap_err();
            assert!(err.is_validation());
            assert!(registry.list_employees(None).unwrap().is_empty());
        }
    }

    #[test_context(RegistryContext)]
    #[test]
    fn test_unknown_employee_is_not_found(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            assert!(registry.employee(42).unwrap_err().is_not_found());
            assert!(registry.employee_by_national_id("999.999.999-99").unwrap_err().is_not_found());
            assert!(registry.employee_by_national_id("---").unwrap_err().is_not_found());
        }
    }

    const RACERS: usize = 16;

    #[test_context(RegistryContext)]
    #[test]
    fn test_concurrent_creates_with_one_cpf_store_one_employee(ctx: &mut RegistryContext) {
        for registry in &ctx.registries {
            let barrier = Barrier::new(RACERS);
            let results: Vec<_> = thread::scope(|scope| {
                let handles: Vec<_> = (0..RACERS)
                    .map(|n| {
                        let registry = registry.clone();
                        let barrier = &barrier;
                        scope.spawn(move || {
                            let cpf = if n % 2 == 0 { "123.456.789-00" } else { "12345678900" };
                            barrier.wait();
                            registry.create_employee(&EmployeeDraft::new("Ana Silva", cpf, "2024-01-10"))
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
            });

            assert_eq!(results.iter().filter(|u| u.created).count(), 1);
            assert!(results.iter().all(|u| u.record.id == results[0].record.id));
            assert_eq!(registry.list_employees(None).unwrap().len(), 1);
        }
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use jiff::Timestamp;

    use crate::{
        clock::ManualClock,
        error::{ChecklistError, StoreError, StoreErrorKind, StoreResult},
        lifecycle::LifecycleManager,
        models::{
            AuditAction, Checklist, ChecklistEdit, ChecklistStatus, DefectItem, FinalizePath,
            FinalizeReceipt, FinalizeRequest, FuelGaugePhotos, ReopenRequest,
        },
        params::{
            CreateChecklist, DeleteChecklist, ListFinished, ListInProgress, ReportParams,
            SaveChecklist,
        },
        store::{ChecklistStore, MemoryStore, PrivilegedOps, RpcAvailability},
    };

    /// Privileged backend that answers finalize without writing anything.
    struct UnsuccessfulFinalize;

    impl PrivilegedOps for UnsuccessfulFinalize {
        fn finalize(&self, _request: &FinalizeRequest) -> StoreResult<FinalizeReceipt> {
            Ok(FinalizeReceipt {
                success: false,
                maintenance_seconds: 0,
            })
        }

        fn reopen(&self, _request: &ReopenRequest) -> StoreResult<()> {
            Err(StoreError::new(StoreErrorKind::Unsupported, "not installed"))
        }
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn clock_at(s: &str) -> ManualClock {
        ManualClock::new(ts(s))
    }

    fn create_params(plate: &str) -> CreateChecklist {
        CreateChecklist {
            vehicle_plate: plate.to_string(),
            supplier_id: Some("acme-motors".to_string()),
            service: Some("Brake inspection".to_string()),
            ..Default::default()
        }
    }

    fn seeded(id: u64, status: ChecklistStatus, started_at: Option<Timestamp>) -> Checklist {
        Checklist {
            id,
            sequence_label: None,
            vehicle_plate: format!("PLT{id:04}"),
            supplier_id: None,
            service: None,
            status,
            started_at,
            finished_at: None,
            maintenance_seconds: 0,
            is_locked: false,
            notes: None,
            defect_items: Vec::new(),
            media: Vec::new(),
            budget_attachments: Vec::new(),
            fuel_gauge_photos: FuelGaugePhotos::default(),
            created_at: ts("2023-12-31T00:00:00Z"),
        }
    }

    #[test]
    fn test_open_draft_starts_once() {
        let store = MemoryStore::new();
        let clock = clock_at("2024-02-01T12:00:00Z");
        let manager = LifecycleManager::new(&store, clock.clone());
        let created = manager.create(&create_params("C2")).unwrap();
        let writes_before = store.write_count().unwrap();

        let opened = manager.open(created.id).unwrap();
        assert_eq!(opened.status, ChecklistStatus::InProgress);
        assert_eq!(opened.started_at, Some(ts("2024-02-01T12:00:00Z")));
        assert!(!opened.is_locked);
        assert_eq!(store.write_count().unwrap(), writes_before + 1);

        clock.advance_secs(10);
        let reopened = manager.open(created.id).unwrap();
        assert_eq!(reopened.started_at, Some(ts("2024-02-01T12:00:00Z")));
        assert_eq!(reopened.status, ChecklistStatus::InProgress);
        assert_eq!(store.write_count().unwrap(), writes_before + 1);
    }

    #[test]
    fn test_open_missing_checklist_is_not_found() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-02-01T12:00:00Z"));
        assert!(matches!(
            manager.open(99),
            Err(ChecklistError::NotFound { id: 99 })
        ));
    }

    #[test]
    fn test_open_finalized_is_a_no_op() {
        let store = MemoryStore::new();
        let mut finalized = seeded(1, ChecklistStatus::Finalized, Some(ts("2024-01-01T00:00:00Z")));
        finalized.finished_at = Some(ts("2024-01-01T02:00:00Z"));
        finalized.maintenance_seconds = 7200;
        finalized.is_locked = true;
        store.seed(finalized.clone()).unwrap();

        let manager = LifecycleManager::new(&store, clock_at("2024-02-01T12:00:00Z"));
        assert_eq!(manager.open(1).unwrap(), finalized);
        assert_eq!(store.write_count().unwrap(), 0);
    }

    #[test]
    fn test_privileged_finalize_locks_atomically() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:30:00Z"))
            .with_privileged(&store);

        let outcome = manager.finalize(1, Some("maria")).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.path, FinalizePath::Privileged);
        assert!(outcome.locked);
        assert_eq!(outcome.maintenance_seconds, 5400);

        let record = manager.get(1).unwrap();
        assert_eq!(record.status, ChecklistStatus::Finalized);
        assert!(record.is_locked);
        assert_eq!(store.write_count().unwrap(), 1);

        let trail = manager.history(1).unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].actor.as_deref(), Some("maria"));
    }

    #[test]
    fn test_fallback_finalize_when_rpc_unsupported() {
        let store = MemoryStore::new().with_rpc(RpcAvailability::Missing);
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:30:00Z"))
            .with_privileged(&store);

        let outcome = manager.finalize(1, None).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.path, FinalizePath::Fallback);
        assert_eq!(outcome.maintenance_seconds, 5400);
        assert!(outcome.locked);

        let record = manager.get(1).unwrap();
        assert_eq!(record.status, ChecklistStatus::Finalized);
        assert_eq!(record.finished_at, Some(ts("2024-01-01T01:30:00Z")));
        assert_eq!(record.maintenance_seconds, 5400);
        assert!(record.is_locked);
        assert_eq!(store.write_count().unwrap(), 2);
    }

    #[test]
    fn test_fallback_finalize_when_rpc_denied() {
        let store = MemoryStore::new().with_rpc(RpcAvailability::Denied);
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T00:00:42Z"))
            .with_privileged(&store);

        let outcome = manager.finalize(1, None).unwrap();
        assert_eq!(outcome.path, FinalizePath::Fallback);
        assert_eq!(outcome.maintenance_seconds, 42);
    }

    #[test]
    fn test_fallback_succeeds_when_lock_write_is_denied() {
        let store = MemoryStore::new()
            .with_rpc(RpcAvailability::Missing)
            .deny_lock_writes();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:30:00Z"))
            .with_privileged(&store);

        let outcome = manager.finalize(1, None).unwrap();
        assert!(outcome.success);
        assert!(!outcome.locked);
        assert_eq!(outcome.maintenance_seconds, 5400);

        let record = manager.get(1).unwrap();
        assert_eq!(record.status, ChecklistStatus::Finalized);
        assert!(!record.is_locked);
    }

    #[test]
    fn test_fallback_never_locks_and_changes_status_in_one_write() {
        let store = MemoryStore::new()
            .with_rpc(RpcAvailability::Missing)
            .deny_lock_with_status();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:00:00Z"));

        let outcome = manager.finalize(1, None).unwrap();
        assert!(outcome.locked);
        assert!(manager.get(1).unwrap().is_locked);
    }

    #[test]
    fn test_finalize_without_start_yields_zero() {
        let store = MemoryStore::new();
        store.seed(seeded(1, ChecklistStatus::Draft, None)).unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:00:00Z"));

        let outcome = manager.finalize(1, None).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.maintenance_seconds, 0);

        let record = manager.get(1).unwrap();
        assert_eq!(record.status, ChecklistStatus::Finalized);
        assert_eq!(record.started_at, Some(ts("2024-01-01T01:00:00Z")));
        assert_eq!(record.finished_at, Some(ts("2024-01-01T01:00:00Z")));
    }

    #[test]
    fn test_open_then_finalize_same_instant_is_zero() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T08:00:00Z"))
            .with_privileged(&store);
        let created = manager.create(&create_params("ZERO001")).unwrap();

        manager.open(created.id).unwrap();
        let outcome = manager.finalize(created.id, None).unwrap();
        assert_eq!(outcome.maintenance_seconds, 0);
    }

    #[test]
    fn test_clock_skew_is_clamped_to_zero() {
        let store = MemoryStore::new().with_rpc(RpcAvailability::Missing);
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T10:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T09:59:00Z"))
            .with_privileged(&store);

        assert_eq!(manager.finalize(1, None).unwrap().maintenance_seconds, 0);
    }

    #[test]
    fn test_double_finalize_is_rejected_on_both_paths() {
        for rpc in [RpcAvailability::Installed, RpcAvailability::Missing] {
            let store = MemoryStore::new().with_rpc(rpc);
            store
                .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
                .unwrap();
            let clock = clock_at("2024-01-01T01:00:00Z");
            let manager = LifecycleManager::new(&store, clock.clone()).with_privileged(&store);

            manager.finalize(1, None).unwrap();
            let writes = store.write_count().unwrap();
            clock.advance_secs(600);

            assert!(matches!(
                manager.finalize(1, None),
                Err(ChecklistError::AlreadyFinalized { id: 1 })
            ));
            let record = manager.get(1).unwrap();
            assert_eq!(record.finished_at, Some(ts("2024-01-01T01:00:00Z")));
            assert_eq!(record.maintenance_seconds, 3600);
            assert_eq!(store.write_count().unwrap(), writes);
        }
    }

    #[test]
    fn test_finalize_missing_checklist_is_not_found_on_both_paths() {
        for rpc in [RpcAvailability::Installed, RpcAvailability::Missing] {
            let store = MemoryStore::new().with_rpc(rpc);
            let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:00:00Z"))
                .with_privileged(&store);
            assert!(matches!(
                manager.finalize(7, None),
                Err(ChecklistError::NotFound { id: 7 })
            ));
        }
    }

    #[test]
    fn test_fallback_store_failure_propagates() {
        let store = MemoryStore::new().with_rpc(RpcAvailability::Missing);
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        store.fail_next_update(StoreErrorKind::Backend).unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:00:00Z"))
            .with_privileged(&store);

        let err = manager.finalize(1, None).unwrap_err();
        assert_eq!(err.store_kind(), Some(StoreErrorKind::Backend));
        assert_eq!(manager.get(1).unwrap().status, ChecklistStatus::InProgress);
    }

    #[test]
    fn test_reopen_restores_in_progress_and_keeps_start() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let clock = clock_at("2024-01-01T02:00:00Z");
        let manager = LifecycleManager::new(&store, clock.clone()).with_privileged(&store);
        manager.finalize(1, None).unwrap();

        clock.advance_secs(3600);
        let reopened = manager.reopen(1, Some("lead")).unwrap();
        assert_eq!(reopened.status, ChecklistStatus::InProgress);
        assert!(!reopened.is_locked);
        assert!(reopened.finished_at.is_none());
        assert_eq!(reopened.maintenance_seconds, 0);
        assert_eq!(reopened.started_at, Some(ts("2024-01-01T00:00:00Z")));

        let trail = manager.history(1).unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1].action, AuditAction::Reopened);
        assert_eq!(trail[1].maintenance_seconds, Some(7200));

        clock.advance_secs(3600);
        let outcome = manager.finalize(1, None).unwrap();
        assert_eq!(outcome.maintenance_seconds, 4 * 3600);
    }

    #[test]
    fn test_reopen_has_no_fallback() {
        let store = MemoryStore::new().with_rpc(RpcAvailability::Missing);
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"))
            .with_privileged(&store);
        manager.finalize(1, None).unwrap();

        let err = manager.reopen(1, None).unwrap_err();
        assert_eq!(err.store_kind(), Some(StoreErrorKind::Unsupported));
        assert_eq!(manager.get(1).unwrap().status, ChecklistStatus::Finalized);
    }

    #[test]
    fn test_reopen_requires_finalized() {
        let store = MemoryStore::new();
        store.seed(seeded(1, ChecklistStatus::Draft, None)).unwrap();
        let manager =
            LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z")).with_privileged(&store);

        match manager.reopen(1, None) {
            Err(ChecklistError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_reopen_conflicts_with_newer_open_checklist() {
        let store = MemoryStore::new();
        let manager =
            LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z")).with_privileged(&store);
        let first = manager.create(&create_params("abc1d23")).unwrap();
        manager.finalize(first.id, None).unwrap();
        manager.create(&create_params("ABC1D23")).unwrap();

        assert!(matches!(
            manager.reopen(first.id, None),
            Err(ChecklistError::Conflict { plate }) if plate == "ABC1D23"
        ));
    }

    #[test]
    fn test_create_assigns_sequence_and_normalizes() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let params = CreateChecklist {
            vehicle_plate: "  abc1d23 ".to_string(),
            supplier_id: Some("   ".to_string()),
            notes: Some("<i>scratch</i> on door".to_string()),
            defect_items: vec![DefectItem::new("door")],
            ..Default::default()
        };

        let created = manager.create(&params).unwrap();
        assert_eq!(created.vehicle_plate, "ABC1D23");
        assert_eq!(created.sequence_label.as_deref(), Some("CHK-000001"));
        assert_eq!(created.status, ChecklistStatus::Draft);
        assert!(created.supplier_id.is_none());
        assert_eq!(created.notes.as_deref(), Some("scratch on door"));
        assert!(!created.is_locked);
        assert_eq!(created.maintenance_seconds, 0);
        assert!(created.started_at.is_none());

        let second = manager.create(&create_params("XYZ9K88")).unwrap();
        assert_eq!(second.sequence_label.as_deref(), Some("CHK-000002"));
    }

    #[test]
    fn test_create_rejects_second_open_checklist() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let first = manager.create(&create_params("ABC1D23")).unwrap();
        manager.open(first.id).unwrap();

        let err = manager.create(&create_params("abc1d23")).unwrap_err();
        assert!(matches!(err, ChecklistError::Conflict { ref plate } if plate == "ABC1D23"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_create_allowed_after_finalize() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let first = manager.create(&create_params("ABC1D23")).unwrap();
        manager.finalize(first.id, None).unwrap();

        let second = manager.create(&create_params("ABC1D23")).unwrap();
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn test_create_rejects_blank_plate() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        assert!(matches!(
            manager.create(&create_params(" ")),
            Err(ChecklistError::InvalidInput { .. })
        ));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_save_edits_open_checklist() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let created = manager
            .create(&CreateChecklist {
                defect_items: vec![DefectItem::new("horn")],
                ..create_params("ABC1D23")
            })
            .unwrap();
        manager.open(created.id).unwrap();

        let saved = manager
            .save_changes(&SaveChecklist {
                id: created.id,
                notes: Some(" <b>replace pads</b> ".to_string()),
                add_defects: vec![DefectItem::new("brake pads")],
                add_photos: vec!["uploads/1/front.jpg".to_string()],
                add_budgets: vec!["uploads/1/budget-2024.pdf".to_string()],
                fuel_entry: Some("uploads/1/fuel-in.jpg".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(saved.notes.as_deref(), Some("replace pads"));
        assert_eq!(
            saved.defect_items,
            vec![DefectItem::new("horn"), DefectItem::new("brake pads")]
        );
        assert_eq!(saved.media.len(), 1);
        assert_eq!(saved.media[0].kind, "photo");
        assert_eq!(saved.budget_attachments[0].name, "budget-2024.pdf");
        assert_eq!(
            saved.fuel_gauge_photos.entry.as_deref(),
            Some("uploads/1/fuel-in.jpg")
        );
        assert_eq!(saved.status, ChecklistStatus::InProgress);
    }

    #[test]
    fn test_save_with_empty_notes_clears_them() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let created = manager
            .create(&CreateChecklist {
                notes: Some("initial".to_string()),
                ..create_params("ABC1D23")
            })
            .unwrap();

        let edit = ChecklistEdit {
            notes: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(manager.save(created.id, edit).unwrap().notes.is_none());
    }

    #[test]
    fn test_save_rejects_finalized_checklist() {
        let store = MemoryStore::new();
        let manager =
            LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z")).with_privileged(&store);
        let created = manager.create(&create_params("ABC1D23")).unwrap();
        manager.finalize(created.id, None).unwrap();
        let writes = store.write_count().unwrap();

        let edit = ChecklistEdit {
            notes: Some("too late".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            manager.save(created.id, edit),
            Err(ChecklistError::Locked { .. })
        ));
        assert_eq!(store.write_count().unwrap(), writes);
    }

    #[test]
    fn test_save_rejects_finalized_even_when_lock_failed() {
        let store = MemoryStore::new()
            .with_rpc(RpcAvailability::Missing)
            .deny_lock_writes();
        let manager =
            LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z")).with_privileged(&store);
        let created = manager.create(&create_params("ABC1D23")).unwrap();
        assert!(!manager.finalize(created.id, None).unwrap().locked);

        let edit = ChecklistEdit {
            notes: Some("edit".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            manager.save(created.id, edit),
            Err(ChecklistError::Locked { .. })
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"));
        let created = manager.create(&create_params("ABC1D23")).unwrap();

        assert!(matches!(
            manager.delete(&DeleteChecklist {
                id: created.id,
                confirmed: false
            }),
            Err(ChecklistError::InvalidInput { .. })
        ));
        manager
            .delete(&DeleteChecklist {
                id: created.id,
                confirmed: true,
            })
            .unwrap();
        assert!(matches!(
            manager.get(created.id),
            Err(ChecklistError::NotFound { .. })
        ));
        assert!(matches!(
            manager.delete(&DeleteChecklist {
                id: created.id,
                confirmed: true,
            }),
            Err(ChecklistError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_in_progress_min_hours() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        store
            .seed(seeded(2, ChecklistStatus::InProgress, Some(ts("2024-01-03T10:00:00Z"))))
            .unwrap();
        store.seed(seeded(3, ChecklistStatus::InProgress, None)).unwrap();
        store.seed(seeded(4, ChecklistStatus::Draft, None)).unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-03T12:00:00Z"));

        let all = manager.list_in_progress(&ListInProgress::default()).unwrap();
        let ids: Vec<u64> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let old = manager
            .list_in_progress(&ListInProgress {
                min_hours: Some(24.0),
                ..Default::default()
            })
            .unwrap();
        let ids: Vec<u64> = old.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        let by_plate = manager
            .list_in_progress(&ListInProgress {
                plate: Some("plt0002".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_plate.len(), 1);
        assert_eq!(by_plate[0].id, 2);
    }

    #[test]
    fn test_list_finished_rejects_inverted_range() {
        let store = MemoryStore::new();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-03T12:00:00Z"));
        let params = ListFinished {
            plate: None,
            from: Some(ts("2024-02-01T00:00:00Z")),
            to: Some(ts("2024-01-01T00:00:00Z")),
        };
        assert!(matches!(
            manager.list_finished(&params),
            Err(ChecklistError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_report_over_finalized_checklists() {
        let store = MemoryStore::new();
        let clock = clock_at("2024-01-01T08:00:00Z");
        let manager = LifecycleManager::new(&store, clock.clone()).with_privileged(&store);

        for (plate, minutes) in [("AAA0001", 90), ("BBB0002", 30), ("AAA0001", 60)] {
            let created = manager.create(&create_params(plate)).unwrap();
            manager.open(created.id).unwrap();
            clock.advance_secs(minutes * 60);
            manager.finalize(created.id, None).unwrap();
        }

        let report = manager
            .report(&ReportParams {
                status: Some(ChecklistStatus::Finalized),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.total_hours, 3.0);
        assert_eq!(report.average_hours, 1.0);
        assert_eq!(report.by_vehicle.len(), 2);
        let aaa = report
            .by_vehicle
            .iter()
            .find(|g| g.key == "AAA0001")
            .unwrap();
        assert_eq!(aaa.average_hours, 1.25);
    }

    #[test]
    fn test_store_errors_surface_verbatim() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::Draft, None))
            .unwrap();
        store.fail_next_update(StoreErrorKind::Backend).unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T08:00:00Z"));

        let err = manager.open(1).unwrap_err();
        assert!(matches!(err, ChecklistError::Store(_)));
        assert_eq!(manager.get(1).unwrap().status, ChecklistStatus::Draft);
        assert!(store.get(1).unwrap().is_some());
    }

    #[test]
    fn test_privileged_finalize_reporting_failure_is_an_error() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T02:00:00Z"))
            .with_privileged(UnsuccessfulFinalize);

        let err = manager.finalize(1, None).unwrap_err();
        assert_eq!(err.store_kind(), Some(StoreErrorKind::Backend));

        let record = manager.get(1).unwrap();
        assert_eq!(record.status, ChecklistStatus::InProgress);
        assert!(!record.is_locked);
        assert_eq!(store.write_count().unwrap(), 0);
    }

    #[test]
    fn test_list_in_progress_at_uses_given_instant() {
        let store = MemoryStore::new();
        store
            .seed(seeded(1, ChecklistStatus::InProgress, Some(ts("2024-01-01T00:00:00Z"))))
            .unwrap();
        let manager = LifecycleManager::new(&store, clock_at("2024-01-01T01:00:00Z"));
        let params = ListInProgress {
            min_hours: Some(2.0),
            ..Default::default()
        };

        assert!(manager.list_in_progress(&params).unwrap().is_empty());

        let later = manager
            .list_in_progress_at(&params, ts("2024-01-01T03:00:00Z"))
            .unwrap();
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].id, 1);
    }
}

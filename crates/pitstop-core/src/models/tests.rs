#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::models::{
        AgeBand, Checklist, ChecklistEdit, ChecklistOrder, ChecklistPatch, ChecklistQuery,
        ChecklistStatus, DefectItem, FuelGaugePhotos, Report,
    };

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn create_test_checklist(id: u64, status: ChecklistStatus) -> Checklist {
        let created = Timestamp::from_second(1704067200).unwrap(); // 2024-01-01 00:00:00 UTC
        let (started_at, finished_at, maintenance_seconds, is_locked) = match status {
            ChecklistStatus::Draft => (None, None, 0, false),
            ChecklistStatus::InProgress => (Some(created), None, 0, false),
            ChecklistStatus::Finalized => {
                (Some(created), Some(ts("2024-01-01T01:30:00Z")), 5400, true)
            }
        };
        Checklist {
            id,
            sequence_label: Some(format!("CHK-{id:06}")),
            vehicle_plate: "ABC1D23".to_string(),
            supplier_id: Some("supplier-1".to_string()),
            service: Some("Brake pads".to_string()),
            status,
            started_at,
            finished_at,
            maintenance_seconds,
            is_locked,
            notes: None,
            defect_items: vec![],
            media: vec![],
            budget_attachments: vec![],
            fuel_gauge_photos: FuelGaugePhotos::default(),
            created_at: created,
        }
    }

    #[test]
    fn test_status_round_trips_through_storage_string() {
        for status in [
            ChecklistStatus::Draft,
            ChecklistStatus::InProgress,
            ChecklistStatus::Finalized,
        ] {
            assert_eq!(status.as_str().parse::<ChecklistStatus>(), Ok(status));
        }
        assert_eq!(
            "In-Progress".parse::<ChecklistStatus>(),
            Ok(ChecklistStatus::InProgress)
        );
        assert!("archived".parse::<ChecklistStatus>().is_err());
    }

    #[test]
    fn test_status_transitions() {
        use ChecklistStatus::*;

        assert!(Draft.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Finalized));
        assert!(Finalized.can_transition_to(InProgress));
        assert!(Draft.can_transition_to(Finalized));

        assert!(!InProgress.can_transition_to(Draft));
        assert!(!Finalized.can_transition_to(Draft));
        assert!(!Finalized.can_transition_to(Finalized));
    }

    #[test]
    fn test_open_statuses() {
        assert!(ChecklistStatus::Draft.is_open());
        assert!(ChecklistStatus::InProgress.is_open());
        assert!(!ChecklistStatus::Finalized.is_open());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ChecklistStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_elapsed_seconds_per_status() {
        let now = ts("2024-01-01T00:10:00Z");

        let draft = create_test_checklist(1, ChecklistStatus::Draft);
        assert_eq!(draft.elapsed_seconds(now), 0);

        let in_progress = create_test_checklist(2, ChecklistStatus::InProgress);
        assert_eq!(in_progress.elapsed_seconds(now), 600);

        let finalized = create_test_checklist(3, ChecklistStatus::Finalized);
        assert_eq!(finalized.elapsed_seconds(now), 5400);
    }

    #[test]
    fn test_elapsed_seconds_never_negative() {
        let checklist = create_test_checklist(1, ChecklistStatus::InProgress);
        let before_start = ts("2023-12-31T23:59:00Z");
        assert_eq!(checklist.elapsed_seconds(before_start), 0);
    }

    #[test]
    fn test_age_band_thresholds() {
        assert_eq!(AgeBand::from_seconds(0), AgeBand::Fresh);
        assert_eq!(AgeBand::from_seconds(24 * 3600 - 1), AgeBand::Fresh);
        assert_eq!(AgeBand::from_seconds(24 * 3600), AgeBand::Aging);
        assert_eq!(AgeBand::from_seconds(72 * 3600 - 1), AgeBand::Aging);
        assert_eq!(AgeBand::from_seconds(72 * 3600), AgeBand::Overdue);

        let checklist = create_test_checklist(1, ChecklistStatus::InProgress);
        assert_eq!(
            checklist.age_band(ts("2024-01-02T12:00:00Z")),
            Some(AgeBand::Aging)
        );
        let finalized = create_test_checklist(2, ChecklistStatus::Finalized);
        assert_eq!(finalized.age_band(ts("2024-01-09T00:00:00Z")), None);
    }

    #[test]
    fn test_is_editable() {
        assert!(create_test_checklist(1, ChecklistStatus::Draft).is_editable());
        assert!(create_test_checklist(2, ChecklistStatus::InProgress).is_editable());
        assert!(!create_test_checklist(3, ChecklistStatus::Finalized).is_editable());

        let mut finalized_unlocked = create_test_checklist(4, ChecklistStatus::Finalized);
        finalized_unlocked.is_locked = false;
        assert!(!finalized_unlocked.is_editable());
    }

    #[test]
    fn test_patch_applies_only_named_fields() {
        let mut checklist = create_test_checklist(1, ChecklistStatus::Draft);
        checklist.notes = Some("keep me".to_string());

        let at = ts("2024-01-01T00:05:00Z");
        ChecklistPatch::start(at).apply_to(&mut checklist);

        assert_eq!(checklist.status, ChecklistStatus::InProgress);
        assert_eq!(checklist.started_at, Some(at));
        assert!(!checklist.is_locked);
        assert_eq!(checklist.notes.as_deref(), Some("keep me"));
        assert_eq!(checklist.finished_at, None);
    }

    #[test]
    fn test_finish_patch_leaves_lock_untouched() {
        let patch = ChecklistPatch::finish(ts("2024-01-01T01:30:00Z"), 5400);
        assert!(patch.is_locked.is_none());
        assert!(!patch.locks_with_status_change());
        assert!(!ChecklistPatch::start(ts("2024-01-01T00:00:00Z")).locks_with_status_change());

        let combined = ChecklistPatch {
            is_locked: Some(true),
            ..ChecklistPatch::finish(ts("2024-01-01T01:30:00Z"), 5400)
        };
        assert!(combined.locks_with_status_change());
    }

    #[test]
    fn test_edit_to_patch_clears_empty_notes() {
        let patch: ChecklistPatch = ChecklistEdit {
            notes: Some(String::new()),
            defect_items: Some(vec![DefectItem::new("tyres")]),
            ..Default::default()
        }
        .into();

        assert_eq!(patch.notes, Some(None));
        assert!(patch.status.is_none());
        assert!(ChecklistPatch::default().is_empty());
    }

    #[test]
    fn test_query_matches_filters() {
        let checklist = create_test_checklist(1, ChecklistStatus::Finalized);

        let query = ChecklistQuery {
            statuses: vec![ChecklistStatus::Finalized],
            plate_contains: Some("abc".to_string()),
            supplier_contains: Some("SUPPLIER".to_string()),
            finished_from: Some(ts("2024-01-01T01:30:00Z")),
            finished_to: Some(ts("2024-01-01T01:30:00Z")),
            ..Default::default()
        };
        assert!(query.matches(&checklist));

        let wrong_status = ChecklistQuery {
            statuses: vec![ChecklistStatus::InProgress],
            ..Default::default()
        };
        assert!(!wrong_status.matches(&checklist));

        let too_late = ChecklistQuery {
            finished_from: Some(ts("2024-01-01T02:00:00Z")),
            ..Default::default()
        };
        assert!(!too_late.matches(&checklist));

        let unfinished = create_test_checklist(2, ChecklistStatus::InProgress);
        let bounded = ChecklistQuery {
            finished_to: Some(ts("2030-01-01T00:00:00Z")),
            ..Default::default()
        };
        assert!(!bounded.matches(&unfinished));
    }

    #[test]
    fn test_query_sort_newest_first() {
        let mut a = create_test_checklist(1, ChecklistStatus::InProgress);
        let mut b = create_test_checklist(2, ChecklistStatus::InProgress);
        a.started_at = Some(ts("2024-01-02T00:00:00Z"));
        b.started_at = Some(ts("2024-01-01T00:00:00Z"));
        let c = create_test_checklist(3, ChecklistStatus::Draft);

        let mut list = vec![b, c, a];
        ChecklistQuery {
            order: ChecklistOrder::StartedDesc,
            ..Default::default()
        }
        .sort(&mut list);

        let ids: Vec<u64> = list.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_report_aggregates() {
        let mut first = create_test_checklist(1, ChecklistStatus::Finalized);
        first.maintenance_seconds = 3600;
        let mut second = create_test_checklist(2, ChecklistStatus::Finalized);
        second.maintenance_seconds = 7200;
        second.vehicle_plate = "XYZ9876".to_string();
        second.supplier_id = None;
        let third = create_test_checklist(3, ChecklistStatus::Draft);

        let report = Report::from_checklists(&[first, second, third]);

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].sequence, "CHK-000001");
        assert_eq!(report.rows[1].supplier, "-");
        assert_eq!(report.rows[2].started, "-");
        assert_eq!(report.rows[2].hours, 0.0);
        assert_eq!(report.total_hours, 3.0);
        assert_eq!(report.average_hours, 1.0);

        assert_eq!(report.by_vehicle.len(), 2);
        assert_eq!(report.by_vehicle[0].key, "ABC1D23");
        assert_eq!(report.by_vehicle[0].average_hours, 0.5);
        assert_eq!(report.by_vehicle[1].average_hours, 2.0);
        assert_eq!(report.by_supplier[1].key, "-");
    }

    #[test]
    fn test_report_hours_rounded_to_two_decimals() {
        let mut checklist = create_test_checklist(1, ChecklistStatus::Finalized);
        checklist.maintenance_seconds = 1000;
        let report = Report::from_checklists(&[checklist]);
        assert_eq!(report.rows[0].hours, 0.28);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::from_checklists(&[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.total_hours, 0.0);
        assert_eq!(report.average_hours, 0.0);
    }

    #[test]
    fn test_report_csv_has_bom_and_crlf() {
        let report = Report::from_checklists(&[create_test_checklist(1, ChecklistStatus::Finalized)]);
        let mut out = Vec::new();
        report.write_csv(&mut out).expect("Failed to write CSV");

        assert!(out.starts_with(b"\xEF\xBB\xBF"));
        let text = String::from_utf8(out[3..].to_vec()).unwrap();
        let mut lines = text.split("\r\n");
        assert_eq!(
            lines.next(),
            Some("sequence,plate,supplier,started,finished,hours")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("CHK-000001,ABC1D23,supplier-1,"));
        assert!(row.ends_with(",1.5"));
    }
}

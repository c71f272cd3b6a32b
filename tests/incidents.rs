#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fixtrack::libs::date_range::DateRange;
    use fixtrack::libs::error::AnalyticsError;
    use fixtrack::libs::incident::{ActivityRecord, DowntimeType, DurationSource, IncidentNormalizer, RawActivityRecord};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> DateRange {
        DateRange::from_days(day(2024, 3, 1), day(2024, 3, 31)).unwrap()
    }

    fn clock_record(date: &str, start: &str, end: &str) -> RawActivityRecord {
        RawActivityRecord {
            asset_id: "press-1".to_string(),
            date: date.to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Default::default()
        }
    }

    fn reported_record(date: &str, minutes: f64) -> RawActivityRecord {
        RawActivityRecord {
            asset_id: "press-1".to_string(),
            date: date.to_string(),
            downtime: Some(minutes),
            ..Default::default()
        }
    }

    #[test]
    fn test_overnight_clock_span_wraps_midnight() {
        let normalized = IncidentNormalizer::new(march())
            .normalize(&[clock_record("2024-03-04", "22:00", "02:00")])
            .unwrap();

        assert_eq!(normalized.incidents.len(), 1);
        assert_eq!(normalized.incidents[0].duration_minutes, 240.0);
    }

    #[test]
    fn test_same_day_clock_span() {
        let normalized = IncidentNormalizer::new(march())
            .normalize(&[clock_record("2024-03-04", "9:15", "10:45")])
            .unwrap();
        assert_eq!(normalized.incidents[0].duration_minutes, 90.0);
        assert_eq!(normalized.incidents[0].start_minute, 555);
    }

    #[test]
    fn test_reported_downtime_wins_over_clock_values() {
        let mut record = clock_record("2024-03-04", "08:00", "09:00");
        record.downtime = Some(15.0);

        let normalized = IncidentNormalizer::new(march()).normalize(&[record]).unwrap();
        assert_eq!(normalized.incidents[0].duration_minutes, 15.0);
        assert_eq!(normalized.incidents[0].start_minute, 480);
    }

    #[test]
    fn test_reported_downtime_ignores_malformed_clock_values() {
        let mut record = clock_record("2024-03-04", "eight", "nine");
        record.downtime = Some(20.0);

        let normalized = IncidentNormalizer::new(march()).normalize(&[record]).unwrap();
        assert_eq!(normalized.incidents[0].duration_minutes, 20.0);
        assert_eq!(normalized.incidents[0].start_minute, 0);
    }

    #[test]
    fn test_unresolvable_records_are_dropped_not_errors() {
        let records = vec![
            clock_record("2024-03-04", "10:00", "10:00"),
            reported_record("2024-03-05", 0.0),
            RawActivityRecord {
                date: "2024-03-06".to_string(),
                start_time: Some("10:00".to_string()),
                ..Default::default()
            },
            reported_record("2024-03-07", 45.0),
        ];

        let normalized = IncidentNormalizer::new(march()).normalize(&records).unwrap();
        assert_eq!(normalized.incidents.len(), 1);
        assert_eq!(normalized.dropped, 3);
    }

    #[test]
    fn test_records_outside_window_are_dropped() {
        let records = vec![reported_record("2024-02-29", 30.0), reported_record("2024-04-01", 30.0), reported_record("2024-03-31", 30.0)];

        let normalized = IncidentNormalizer::new(march()).normalize(&records).unwrap();
        assert_eq!(normalized.incidents.len(), 1);
        assert_eq!(normalized.incidents[0].date, day(2024, 3, 31));
        assert_eq!(normalized.dropped, 2);
    }

    #[test]
    fn test_malformed_clock_value_is_fatal_when_relied_upon() {
        let result = IncidentNormalizer::new(march()).normalize(&[clock_record("2024-03-04", "25:00", "02:00")]);
        assert!(matches!(result, Err(AnalyticsError::InvalidClockTime { .. })));
    }

    #[test]
    fn test_unparseable_record_date_is_fatal() {
        let result = IncidentNormalizer::new(march()).normalize(&[reported_record("03/04/2024", 10.0)]);
        assert_eq!(result.unwrap_err(), AnalyticsError::InvalidDate("03/04/2024".to_string()));
    }

    #[test]
    fn test_output_sorted_by_date_then_start_time() {
        let records = vec![
            clock_record("2024-03-05", "14:00", "15:00"),
            clock_record("2024-03-05", "08:00", "09:00"),
            reported_record("2024-03-05", 5.0),
            clock_record("2024-03-02", "23:00", "23:30"),
        ];

        let normalized = IncidentNormalizer::new(march()).normalize(&records).unwrap();
        let order: Vec<_> = normalized.incidents.iter().map(|i| i.source_id.as_str()).collect();
        assert_eq!(order, vec!["record-3", "record-2", "record-1", "record-0"]);
    }

    #[test]
    fn test_downtime_type_defaults_to_unplanned() {
        assert_eq!(DowntimeType::from_raw(None), DowntimeType::Unplanned);
        assert_eq!(DowntimeType::from_raw(Some("  ")), DowntimeType::Unplanned);
        assert_eq!(DowntimeType::from_raw(Some("Planned")), DowntimeType::Planned);
        assert_eq!(DowntimeType::from_raw(Some("scheduled")), DowntimeType::Unplanned);
    }

    #[test]
    fn test_source_id_prefers_record_id() {
        let raw: RawActivityRecord =
            serde_json::from_str(r#"{"_id":"65f1c0","assetId":"press-1","date":"2024-03-04","downtime":12,"downtimeType":"planned"}"#)
                .unwrap();

        let record = ActivityRecord::parse(&raw, 7).unwrap();
        assert_eq!(record.source_id, "65f1c0");
        assert_eq!(record.source, DurationSource::Reported(12.0));
        assert_eq!(record.downtime_type, DowntimeType::Planned);
    }

    #[test]
    fn test_downtime_candidate_filter() {
        assert!(reported_record("2024-03-04", 1.0).is_downtime_candidate());
        assert!(clock_record("2024-03-04", "10:00", "11:00").is_downtime_candidate());
        assert!(!reported_record("2024-03-04", 0.0).is_downtime_candidate());
        assert!(!RawActivityRecord {
            date: "2024-03-04".to_string(),
            end_time: Some("11:00".to_string()),
            ..Default::default()
        }
        .is_downtime_candidate());
    }
}

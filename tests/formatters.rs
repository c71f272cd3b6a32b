#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use fixtrack::libs::analytics::compute_asset_analytics;
    use fixtrack::libs::formatter::{format_duration, format_minutes, format_percentage, format_period};
    use fixtrack::libs::incident::RawActivityRecord;
    use fixtrack::libs::view::View;

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(&Duration::zero()), "00:00");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        let duration = Duration::hours(1) + Duration::minutes(30);
        assert_eq!(format_duration(&duration), "01:30");

        let duration = Duration::hours(26) + Duration::minutes(5);
        assert_eq!(format_duration(&duration), "26:05");
    }

    #[test]
    fn test_format_duration_negative() {
        assert_eq!(format_duration(&Duration::minutes(-15)), "00:00");
    }

    #[test]
    fn test_format_minutes_rounds_fractions() {
        assert_eq!(format_minutes(0.0), "00:00");
        assert_eq!(format_minutes(12.5), "00:13");
        assert_eq!(format_minutes(1440.0), "24:00");
    }

    #[test]
    fn test_format_minutes_saturates_huge_counts() {
        let saturated = format_duration(&Duration::MAX);
        assert_eq!(format_minutes(1e18), saturated);
        assert_eq!(format_minutes(f64::MAX), saturated);
        assert_eq!(format_minutes(-1e18), "00:00");
    }

    #[test]
    fn test_tables_render_over_reported_downtime() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records = vec![RawActivityRecord {
            asset_id: "press-2".to_string(),
            date: "2024-03-01".to_string(),
            downtime: Some(1e18),
            ..Default::default()
        }];
        let report = compute_asset_analytics(
            "press-2",
            "",
            "",
            &records,
            day.and_hms_opt(0, 0, 0).unwrap(),
            day.and_hms_opt(0, 0, 0).unwrap(),
            None,
        )
        .unwrap();

        let summary = View::summary_table(&report).to_string();
        assert!(summary.contains("0.00%"));
        assert!(summary.contains(&format_duration(&Duration::MAX)));
        assert!(View::series_table(&report).to_string().contains("24:00"));
        assert!(!View::diagnostics_table(&report).to_string().is_empty());
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(100.0), "100.00%");
        assert_eq!(format_percentage(93.75), "93.75%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_period() {
        let first = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let start = first.and_hms_opt(0, 0, 0).unwrap();
        let same_day_end = first.and_hms_milli_opt(23, 59, 59, 999).unwrap();
        let week_end = last.and_hms_milli_opt(23, 59, 59, 999).unwrap();

        assert_eq!(format_period(&start, &same_day_end), "2024-03-04");
        assert_eq!(format_period(&start, &week_end), "2024-03-04 .. 2024-03-10");
    }
}

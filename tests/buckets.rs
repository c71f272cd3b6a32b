#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};
    use fixtrack::libs::analytics::compute_asset_analytics;
    use fixtrack::libs::bucket::{Granularity, PeriodBucketer};
    use fixtrack::libs::date_range::{DateRange, WeekStart};
    use fixtrack::libs::error::AnalyticsError;
    use fixtrack::libs::incident::{DowntimeType, NormalizedIncident};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(first: NaiveDate, last: NaiveDate) -> DateRange {
        DateRange::from_days(first, last).unwrap()
    }

    fn incident(date: NaiveDate, minutes: f64, downtime_type: DowntimeType) -> NormalizedIncident {
        NormalizedIncident {
            date,
            duration_minutes: minutes,
            downtime_type,
            source_id: format!("{}-{}", date, minutes),
            start_minute: 0,
        }
    }

    fn spans(granularity: Granularity, window: &DateRange) -> Vec<(NaiveDate, NaiveDate)> {
        PeriodBucketer::new(granularity, WeekStart::Monday)
            .periods(window)
            .iter()
            .map(|b| (b.first_day(), b.last_day()))
            .collect()
    }

    #[test]
    fn test_daily_buckets_cover_every_day() {
        let window = range(day(2024, 2, 27), day(2024, 3, 2));
        let buckets = PeriodBucketer::default().periods(&window);

        assert_eq!(buckets.len(), 5);
        assert!(buckets.iter().all(|b| b.total_minutes_in_period == 1440));
        assert_eq!(buckets[2].first_day(), day(2024, 2, 29));
    }

    #[test]
    fn test_single_day_window_yields_one_bucket_per_granularity() {
        let window = range(day(2024, 3, 15), day(2024, 3, 15));
        for granularity in [Granularity::Day, Granularity::Week, Granularity::Month, Granularity::Quarter, Granularity::Year] {
            let buckets = PeriodBucketer::new(granularity, WeekStart::Monday).periods(&window);
            assert_eq!(buckets.len(), 1, "{}", granularity);
            assert_eq!(buckets[0].total_minutes_in_period, 1440);
        }
    }

    #[test]
    fn test_weekly_buckets_are_clipped_to_window() {
        // Wednesday to the following Tuesday, two weeks later
        let window = range(day(2024, 3, 6), day(2024, 3, 19));
        assert_eq!(
            spans(Granularity::Week, &window),
            vec![
                (day(2024, 3, 6), day(2024, 3, 10)),
                (day(2024, 3, 11), day(2024, 3, 17)),
                (day(2024, 3, 18), day(2024, 3, 19)),
            ]
        );
    }

    #[test]
    fn test_weekly_buckets_with_sunday_start() {
        let window = range(day(2024, 3, 6), day(2024, 3, 19));
        let buckets = PeriodBucketer::new(Granularity::Week, WeekStart::Sunday).periods(&window);
        let firsts: Vec<_> = buckets.iter().map(|b| b.first_day()).collect();
        assert_eq!(firsts, vec![day(2024, 3, 6), day(2024, 3, 10), day(2024, 3, 17)]);
    }

    #[test]
    fn test_monthly_buckets_first_and_last_clipped() {
        let window = range(day(2024, 1, 15), day(2024, 3, 10));
        let buckets = PeriodBucketer::new(Granularity::Month, WeekStart::Monday).periods(&window);

        let days: Vec<_> = buckets.iter().map(|b| b.total_minutes_in_period / 1440).collect();
        assert_eq!(days, vec![17, 29, 10]);
        assert_eq!(buckets[1].first_day(), day(2024, 2, 1));
        assert_eq!(buckets[1].last_day(), day(2024, 2, 29));
    }

    #[test]
    fn test_quarter_and_year_buckets() {
        let window = range(day(2023, 11, 20), day(2024, 4, 2));
        assert_eq!(
            spans(Granularity::Quarter, &window),
            vec![
                (day(2023, 11, 20), day(2023, 12, 31)),
                (day(2024, 1, 1), day(2024, 3, 31)),
                (day(2024, 4, 1), day(2024, 4, 2)),
            ]
        );
        assert_eq!(
            spans(Granularity::Year, &window),
            vec![(day(2023, 11, 20), day(2023, 12, 31)), (day(2024, 1, 1), day(2024, 4, 2))]
        );
    }

    #[test]
    fn test_buckets_are_contiguous_and_sum_to_window() {
        let window = range(day(2024, 1, 3), day(2024, 12, 30));
        for granularity in [Granularity::Day, Granularity::Week, Granularity::Month, Granularity::Quarter, Granularity::Year] {
            let buckets = PeriodBucketer::new(granularity, WeekStart::Monday).periods(&window);
            let total: i64 = buckets.iter().map(|b| b.total_minutes_in_period).sum();
            assert_eq!(total, window.total_days() * 1440, "{}", granularity);

            for pair in buckets.windows(2) {
                assert_eq!(pair[0].last_day().succ_opt().unwrap(), pair[1].first_day());
            }
            assert_eq!(buckets.first().unwrap().period_start, window.start());
            assert_eq!(buckets.last().unwrap().period_end, window.end());
        }
    }

    #[test]
    fn test_incidents_assigned_to_containing_bucket() {
        let window = range(day(2024, 3, 4), day(2024, 3, 17));
        let incidents = vec![
            incident(day(2024, 3, 4), 30.0, DowntimeType::Unplanned),
            incident(day(2024, 3, 10), 15.0, DowntimeType::Planned),
            incident(day(2024, 3, 11), 60.0, DowntimeType::Unplanned),
        ];

        let buckets = PeriodBucketer::new(Granularity::Week, WeekStart::Monday).bucket(&window, &incidents);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].incident_count, 2);
        assert_eq!(buckets[0].downtime_minutes, 45.0);
        assert_eq!(buckets[0].planned_minutes, 15.0);
        assert_eq!(buckets[0].unplanned_minutes, 30.0);
        assert_eq!(buckets[1].incident_count, 1);
        assert_eq!(buckets[1].raw_downtime_minutes, 60.0);
    }

    #[test]
    fn test_empty_buckets_stay_in_series() {
        let window = range(day(2024, 3, 1), day(2024, 3, 5));
        let incidents = vec![incident(day(2024, 3, 3), 10.0, DowntimeType::Unplanned)];

        let buckets = PeriodBucketer::default().bucket(&window, &incidents);
        let counts: Vec<_> = buckets.iter().map(|b| b.incident_count).collect();
        assert_eq!(counts, vec![0, 0, 1, 0, 0]);
        assert!(buckets.iter().all(|b| b.availability_pct == 100.0));
    }

    #[test]
    fn test_granularity_tokens() {
        assert_eq!("Month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(
            "hour".parse::<Granularity>().unwrap_err(),
            AnalyticsError::UnknownGranularity("hour".to_string())
        );
    }

    #[test]
    fn test_bucket_wire_fields() {
        let window = range(day(2024, 3, 1), day(2024, 3, 1));
        let buckets = PeriodBucketer::default().periods(&window);
        let json = serde_json::to_value(&buckets[0]).unwrap();

        assert_eq!(json["periodStart"], "2024-03-01T00:00:00.000");
        assert_eq!(json["periodEnd"], "2024-03-01T23:59:59.999");
        assert_eq!(json["totalMinutesInPeriod"], 1440);
        assert!(json.get("rawDowntimeMinutes").is_none());
    }

    const ALL_GRANULARITIES: [Granularity; 5] =
        [Granularity::Day, Granularity::Week, Granularity::Month, Granularity::Quarter, Granularity::Year];

    fn assert_partitions(window: &DateRange, week_start: WeekStart) {
        for granularity in ALL_GRANULARITIES {
            let buckets = PeriodBucketer::new(granularity, week_start).periods(window);
            let total: i64 = buckets.iter().map(|b| b.total_minutes_in_period).sum();
            assert_eq!(total, window.total_days() * 1440, "{}", granularity);
            assert_eq!(buckets.first().unwrap().first_day(), window.first_day());
            assert_eq!(buckets.last().unwrap().last_day(), window.last_day());
            for pair in buckets.windows(2) {
                assert_eq!(pair[0].last_day().succ_opt().unwrap(), pair[1].first_day());
            }
        }
    }

    #[test]
    fn test_window_at_calendar_end() {
        let single = range(NaiveDate::MAX, NaiveDate::MAX);
        for granularity in ALL_GRANULARITIES {
            let buckets = PeriodBucketer::new(granularity, WeekStart::Monday).periods(&single);
            assert_eq!(buckets.len(), 1, "{}", granularity);
        }

        let tail = range(NaiveDate::MAX.checked_sub_days(Days::new(100)).unwrap(), NaiveDate::MAX);
        assert_partitions(&tail, WeekStart::Monday);
        assert_partitions(&tail, WeekStart::Sunday);
    }

    #[test]
    fn test_window_at_calendar_start() {
        let head = range(NaiveDate::MIN, NaiveDate::MIN.checked_add_days(Days::new(100)).unwrap());
        assert_partitions(&head, WeekStart::Monday);
        assert_partitions(&head, WeekStart::Sunday);
    }

    #[test]
    fn test_analytics_at_calendar_end() {
        let end = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        for granularity in ALL_GRANULARITIES {
            let report = compute_asset_analytics("press-1", "", "", &[], end, end, Some(granularity)).unwrap();
            assert_eq!(report.series.len(), 1);
            assert_eq!(report.summary.overall_availability, 100.0);
        }
    }
}

//! Pure derivation of [`AnalyticsSummary`] from a scan history.
//!
//! All instants are interpreted in UTC and weeks start on Monday (ISO 8601),
//! so identical inputs always bucket identically regardless of host locale.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use std::collections::BTreeMap;

use crate::analytics::models::AnalyticsSummary;
use crate::models::TrackedCode;

/// Days covered by the per-date histogram, reference date inclusive.
const DATE_WINDOW_DAYS: i64 = 30;

/// Compute the analytics summary for `code` as of `now`.
///
/// Pure and deterministic: no side effects beyond a warn-level log when the
/// stored counter disagrees with the scan list, and `code` is never mutated.
/// Lower boundaries are inclusive, so a scan stamped exactly at midnight
/// counts toward that day.
pub fn compute_analytics(code: &TrackedCode, now: DateTime<Utc>) -> AnalyticsSummary {
    let today = now.date_naive();
    let day_start = start_of_day(today);
    let week_start = start_of_day(start_of_week(today));
    let month_start = start_of_day(start_of_month(today));

    let today_scans = count_since(code, day_start);
    let weekly_scans = count_since(code, week_start);
    let monthly_scans = count_since(code, month_start);

    // One zero entry per day in the window; scans outside it are excluded
    // from this map only.
    let mut scans_by_date: BTreeMap<String, u64> = BTreeMap::new();
    for offset in 0..DATE_WINDOW_DAYS {
        let date = today - Duration::days(offset);
        scans_by_date.insert(date.format("%Y-%m-%d").to_string(), 0);
    }
    for scan in &code.scans {
        let key = scan.timestamp.date_naive().format("%Y-%m-%d").to_string();
        if let Some(count) = scans_by_date.get_mut(&key) {
            *count += 1;
        }
    }

    // Hour-of-day over the whole history, all 24 slots present.
    let mut scans_by_hour: BTreeMap<String, u64> = BTreeMap::new();
    for hour in 0..24 {
        scans_by_hour.insert(format!("{:02}", hour), 0);
    }
    for scan in &code.scans {
        let key = format!("{:02}", scan.timestamp.hour());
        if let Some(count) = scans_by_hour.get_mut(&key) {
            *count += 1;
        }
    }

    // The scan list is authoritative; a stale counter indicates corruption
    // but is not fatal.
    let total_scans = code.scans.len() as u64;
    if total_scans != code.total_scans {
        tracing::warn!(
            code_id = %code.id,
            counter = code.total_scans,
            scans = total_scans,
            "totalScans counter disagrees with scan list, using list length"
        );
    }

    AnalyticsSummary {
        total_scans,
        today_scans,
        weekly_scans,
        monthly_scans,
        scans_by_date,
        scans_by_hour,
    }
}

fn count_since(code: &TrackedCode, boundary: DateTime<Utc>) -> u64 {
    code.scans
        .iter()
        .filter(|scan| scan.timestamp >= boundary)
        .count() as u64
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Monday of `date`'s ISO week.
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScanObservation, TrackedCode};
    use chrono::TimeZone;

    fn code_with_scans(timestamps: &[DateTime<Utc>]) -> TrackedCode {
        let mut code = TrackedCode::new(
            "testcode0001".to_string(),
            "Test".to_string(),
            "https://example.com".to_string(),
            "http://127.0.0.1:3000/track/testcode0001".to_string(),
            timestamps.first().copied().unwrap_or_else(Utc::now),
        );
        for &ts in timestamps {
            code.record_scan(ScanObservation {
                timestamp: ts,
                user_agent: None,
                ip: None,
            });
        }
        code
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_empty_history_all_buckets_zero() {
        let code = code_with_scans(&[]);
        let now = utc(2026, 8, 27, 15, 30, 0);

        let summary = compute_analytics(&code, now);

        assert_eq!(summary.total_scans, 0);
        assert_eq!(summary.today_scans, 0);
        assert_eq!(summary.weekly_scans, 0);
        assert_eq!(summary.monthly_scans, 0);
        assert_eq!(summary.scans_by_date.len(), 30);
        assert_eq!(summary.scans_by_hour.len(), 24);
        assert!(summary.scans_by_date.values().all(|&v| v == 0));
        assert!(summary.scans_by_hour.values().all(|&v| v == 0));
    }

    #[test]
    fn test_midnight_scan_counts_toward_today() {
        // Lower boundary is inclusive.
        let now = utc(2026, 8, 27, 12, 0, 0);
        let code = code_with_scans(&[utc(2026, 8, 27, 0, 0, 0)]);

        let summary = compute_analytics(&code, now);
        assert_eq!(summary.today_scans, 1);
    }

    #[test]
    fn test_week_starts_monday() {
        // 2026-08-27 is a Thursday; its week starts Monday 2026-08-24.
        let now = utc(2026, 8, 27, 12, 0, 0);
        let code = code_with_scans(&[
            utc(2026, 8, 24, 0, 0, 0),  // Monday midnight, inclusive
            utc(2026, 8, 23, 23, 59, 59), // Sunday before, excluded
            utc(2026, 8, 26, 9, 0, 0),  // Wednesday, included
        ]);

        let summary = compute_analytics(&code, now);
        assert_eq!(summary.weekly_scans, 2);
    }

    #[test]
    fn test_month_boundary() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        let code = code_with_scans(&[
            utc(2026, 8, 1, 0, 0, 0),   // first of month, inclusive
            utc(2026, 7, 31, 23, 0, 0), // July, excluded
            utc(2026, 8, 15, 8, 0, 0),
        ]);

        let summary = compute_analytics(&code, now);
        assert_eq!(summary.monthly_scans, 2);
    }

    #[test]
    fn test_date_histogram_window_and_ordering() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        let code = code_with_scans(&[
            utc(2026, 8, 27, 1, 0, 0),  // today
            utc(2026, 8, 27, 2, 0, 0),  // today
            utc(2026, 7, 29, 5, 0, 0),  // 29 days back, oldest day in window
            utc(2026, 7, 28, 5, 0, 0),  // 30 days back, outside the window
        ]);

        let summary = compute_analytics(&code, now);

        assert_eq!(summary.scans_by_date.len(), 30);
        assert_eq!(summary.scans_by_date["2026-08-27"], 2);
        assert_eq!(summary.scans_by_date["2026-07-29"], 1);
        assert!(!summary.scans_by_date.contains_key("2026-07-28"));

        // Window sum excludes only the out-of-window scan.
        let sum: u64 = summary.scans_by_date.values().sum();
        assert_eq!(sum, 3);

        // BTreeMap keys are ISO dates, so iteration is oldest to newest.
        let keys: Vec<&String> = summary.scans_by_date.keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("2026-07-29"));
        assert_eq!(keys.last().map(|k| k.as_str()), Some("2026-08-27"));
    }

    #[test]
    fn test_hour_histogram_is_unwindowed() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        // A scan from years ago still lands in its hour slot.
        let code = code_with_scans(&[
            utc(2020, 1, 1, 9, 15, 0),
            utc(2026, 8, 27, 9, 45, 0),
            utc(2026, 8, 27, 23, 0, 0),
        ]);

        let summary = compute_analytics(&code, now);

        assert_eq!(summary.scans_by_hour.len(), 24);
        assert_eq!(summary.scans_by_hour["09"], 2);
        assert_eq!(summary.scans_by_hour["23"], 1);

        let sum: u64 = summary.scans_by_hour.values().sum();
        assert_eq!(sum, summary.total_scans);
    }

    #[test]
    fn test_identical_timestamps_counted_independently() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        let ts = utc(2026, 8, 27, 10, 0, 0);
        let code = code_with_scans(&[ts, ts, ts]);

        let summary = compute_analytics(&code, now);
        assert_eq!(summary.total_scans, 3);
        assert_eq!(summary.today_scans, 3);
        assert_eq!(summary.scans_by_hour["10"], 3);
    }

    #[test]
    fn test_pure_and_non_mutating() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        let code = code_with_scans(&[utc(2026, 8, 27, 10, 0, 0), utc(2026, 8, 20, 3, 0, 0)]);
        let snapshot = code.clone();

        let first = compute_analytics(&code, now);
        let second = compute_analytics(&code, now);

        assert_eq!(first, second);
        assert_eq!(code.scans.len(), snapshot.scans.len());
        assert_eq!(code.total_scans, snapshot.total_scans);
    }

    #[test]
    fn test_stale_counter_uses_list_length() {
        let now = utc(2026, 8, 27, 12, 0, 0);
        let mut code = code_with_scans(&[utc(2026, 8, 27, 10, 0, 0)]);
        code.total_scans = 42; // corrupt the counter

        let summary = compute_analytics(&code, now);
        assert_eq!(summary.total_scans, 1);
    }

    #[test]
    fn test_staggered_scans_scenario() {
        // Code created at T0, scans arriving at T0+1h, T0+25h, T0+8d.
        let t0 = utc(2026, 8, 1, 10, 0, 0);

        // As of T0+25h only two scans exist; the first is more than a day
        // old, so today covers just the second.
        let code = code_with_scans(&[t0 + Duration::hours(1), t0 + Duration::hours(25)]);
        let summary = compute_analytics(&code, t0 + Duration::hours(25));
        assert_eq!(summary.today_scans, 1);

        let code = code_with_scans(&[
            t0 + Duration::hours(1),
            t0 + Duration::hours(25),
            t0 + Duration::days(8),
        ]);
        let summary = compute_analytics(&code, t0 + Duration::days(8));
        assert_eq!(summary.total_scans, 3);
        assert_eq!(summary.today_scans, 1);
    }
}

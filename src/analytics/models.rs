//! Data models for analytics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived scan statistics for a single tracked code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Count of all scans ever recorded
    pub total_scans: u64,

    /// Scans since the start of the reference instant's calendar day
    pub today_scans: u64,

    /// Scans since the start of the reference instant's ISO week (Monday)
    pub weekly_scans: u64,

    /// Scans since the first of the reference instant's month
    pub monthly_scans: u64,

    /// Per-day counts for the 30 days ending at the reference date,
    /// keyed by ISO date ("YYYY-MM-DD"). Always exactly 30 entries;
    /// lexicographic key order is chronological.
    pub scans_by_date: BTreeMap<String, u64>,

    /// Hour-of-day counts over the entire history, keyed "00".."23".
    /// Always exactly 24 entries. Deliberately unwindowed: it answers
    /// "what hour do scans cluster around", not "recent activity".
    pub scans_by_hour: BTreeMap<String, u64>,
}

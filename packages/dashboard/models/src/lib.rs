#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the dashboard aggregation engine.
//!
//! An [`AggregateSnapshot`] is a point-in-time computation over the
//! normalized record collections: scalar counts, an average resolution
//! time, and grouped breakdowns. It is recomputed fully on every
//! refresh and replaced atomically, never patched incrementally.

use civic_desk_records_models::NormalizedRecord;
use serde::{Deserialize, Serialize};

/// The five normalized collections one dashboard fetch returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Citizen complaints.
    pub complaints: Vec<NormalizedRecord>,
    /// Property verification requests.
    pub verifications: Vec<NormalizedRecord>,
    /// Building approval applications.
    pub approvals: Vec<NormalizedRecord>,
    /// Ward field surveys.
    pub surveys: Vec<NormalizedRecord>,
    /// Detected illegal-construction violations.
    pub violations: Vec<NormalizedRecord>,
}

/// Scalar status counts for one record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// All records, malformed ones included.
    pub total: u64,
    /// Pending-like records (`New` + `Under Review` merged).
    pub pending: u64,
    /// Records being worked.
    pub in_progress: u64,
    /// Successfully concluded records.
    pub resolved: u64,
}

/// Average time-to-resolution across resolved records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionTime {
    /// Mean of per-record ceiling day counts, rounded.
    Days(u64),
    /// No resolved records with both timestamps exist; rendered as
    /// `"N/A"` — zero would falsely imply instant resolution.
    Unavailable,
}

impl std::fmt::Display for ResolutionTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days} days"),
            Self::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Violations tallied for one ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardTally {
    /// Ward label.
    pub ward: String,
    /// Summed metric (violation count).
    pub count: u64,
}

/// Record count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category name.
    pub category: String,
    /// Number of records.
    pub count: u64,
}

/// Violation counts per severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBreakdown {
    /// High-severity violations.
    pub high: u64,
    /// Medium-severity violations.
    pub medium: u64,
    /// Low-severity violations.
    pub low: u64,
}

impl SeverityBreakdown {
    /// Total violations across all levels.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }

    /// Bar width in percent for one bucket, normalized against the
    /// largest bucket rather than the total so the largest always
    /// renders full-width. All-zero breakdowns render zero-width.
    #[must_use]
    pub fn bar_percent(&self, count: u64) -> u8 {
        let max = self.high.max(self.medium).max(self.low);
        if max == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let percent = ((count as f64 / max as f64) * 100.0).round() as u8;
        percent
    }
}

/// The full dashboard computation for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    /// Complaint status counts.
    pub complaints: StatusCounts,
    /// Verification status counts.
    pub verifications: StatusCounts,
    /// Approval status counts.
    pub approvals: StatusCounts,
    /// Survey status counts.
    pub surveys: StatusCounts,
    /// Violation status counts.
    pub violations: StatusCounts,
    /// Average complaint resolution time.
    pub avg_resolution: ResolutionTime,
    /// Top wards by violation count, descending.
    pub top_wards: Vec<WardTally>,
    /// Violation counts per severity.
    pub severity: SeverityBreakdown,
    /// Complaint counts per category, descending.
    pub top_categories: Vec<CategoryCount>,
    /// Percentage of surveyed units without a detected violation.
    pub compliance_percent: u8,
    /// Complaints with an assigned officer.
    pub active_officers: u64,
    /// Distinct complaint categories seen.
    pub departments: u64,
}

/// One display row of the recent-records list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRow {
    /// Record identifier.
    pub id: String,
    /// Title (already default-filled).
    pub title: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Category / department label.
    pub department: String,
    /// Submission date for display.
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_time_displays_sentinel() {
        assert_eq!(ResolutionTime::Days(2).to_string(), "2 days");
        assert_eq!(ResolutionTime::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn severity_bars_normalize_against_the_max_bucket() {
        let breakdown = SeverityBreakdown {
            high: 10,
            medium: 5,
            low: 0,
        };
        assert_eq!(breakdown.bar_percent(breakdown.high), 100);
        assert_eq!(breakdown.bar_percent(breakdown.medium), 50);
        assert_eq!(breakdown.bar_percent(breakdown.low), 0);
    }

    #[test]
    fn all_zero_severity_bars_are_zero_width() {
        let breakdown = SeverityBreakdown::default();
        assert_eq!(breakdown.bar_percent(breakdown.high), 0);
        assert_eq!(breakdown.total(), 0);
    }
}

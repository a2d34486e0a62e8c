//! Aggregation derivations.
//!
//! Each public function computes one dashboard metric from normalized
//! records and declares its fallback for empty or incomplete input.

use std::collections::BTreeSet;

use civic_desk_dashboard_models::{
    AggregateSnapshot, CategoryCount, DashboardData, ResolutionTime, SeverityBreakdown,
    StatusCounts, WardTally,
};
use civic_desk_records_models::{NormalizedRecord, Severity, Status, StatusBucket};

/// How many entries ward and category rankings keep for display.
pub const RANKING_LIMIT: usize = 5;

const SECONDS_PER_DAY: u64 = 86_400;

/// Counts one collection's records by status bucket.
///
/// Every record counts toward the total, whatever its status.
#[must_use]
pub fn status_counts(records: &[NormalizedRecord]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: records.len() as u64,
        ..StatusCounts::default()
    };
    for record in records {
        match record.status.bucket() {
            StatusBucket::Pending => counts.pending += 1,
            StatusBucket::InProgress => counts.in_progress += 1,
            StatusBucket::Resolved => counts.resolved += 1,
            StatusBucket::Other => {}
        }
    }
    counts
}

/// Whole days between submission and resolution, rounded up.
fn resolution_days(record: &NormalizedRecord) -> Option<u64> {
    if record.status != Status::Resolved {
        return None;
    }
    let submitted = record.submitted_at?;
    let resolved = record.resolved_at?;
    let seconds = (resolved - submitted).num_seconds().unsigned_abs();
    Some(seconds.div_ceil(SECONDS_PER_DAY))
}

/// Mean time-to-resolution over records that are `Resolved` and carry
/// both timestamps, rounded to whole days.
///
/// An empty filtered set yields [`ResolutionTime::Unavailable`], never
/// zero.
#[must_use]
pub fn average_resolution_time(records: &[NormalizedRecord]) -> ResolutionTime {
    mean_days(&records.iter().filter_map(resolution_days).collect::<Vec<u64>>())
}

/// [`average_resolution_time`] restricted to one category.
#[must_use]
pub fn category_average_resolution(
    records: &[NormalizedRecord],
    category: &str,
) -> ResolutionTime {
    let days: Vec<u64> = records
        .iter()
        .filter(|r| r.category == category)
        .filter_map(resolution_days)
        .collect();
    mean_days(&days)
}

fn mean_days(days: &[u64]) -> ResolutionTime {
    if days.is_empty() {
        return ResolutionTime::Unavailable;
    }
    let total: u64 = days.iter().sum();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let mean = (total as f64 / days.len() as f64).round() as u64;
    ResolutionTime::Days(mean)
}

/// Ranks wards by summed violation count, descending, truncated to
/// `limit`.
///
/// The sort is stable, so ties keep their encounter order — an
/// explicit policy, since no secondary key is defined.
#[must_use]
pub fn rank_wards(records: &[NormalizedRecord], limit: usize) -> Vec<WardTally> {
    let mut tallies: Vec<WardTally> = Vec::new();
    for record in records {
        match tallies.iter_mut().find(|t| t.ward == record.ward) {
            Some(tally) => tally.count += record.total_violations,
            None => tallies.push(WardTally {
                ward: record.ward.clone(),
                count: record.total_violations,
            }),
        }
    }
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(limit);
    tallies
}

/// Ranks categories by record count, descending, truncated to `limit`.
#[must_use]
pub fn rank_categories(records: &[NormalizedRecord], limit: usize) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|c| c.category == record.category) {
            Some(count) => count.count += 1,
            None => counts.push(CategoryCount {
                category: record.category.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Sums per-severity counts across all records' violation sub-lists.
///
/// A record with no sub-list contributes zero to every bucket.
#[must_use]
pub fn severity_breakdown(records: &[NormalizedRecord]) -> SeverityBreakdown {
    let mut breakdown = SeverityBreakdown::default();
    for note in records.iter().flat_map(|r| r.violations.iter()) {
        match note.severity {
            Severity::High => breakdown.high += 1,
            Severity::Medium => breakdown.medium += 1,
            Severity::Low => breakdown.low += 1,
        }
    }
    breakdown
}

/// Percentage of surveyed units without a detected violation.
///
/// Defined as 100 when `total` is zero — vacuously compliant, so a
/// fresh deployment never renders a division-by-zero as `NaN`.
#[must_use]
pub fn compliance_percentage(total: u64, violating: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let compliant = total.saturating_sub(violating);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = ((compliant as f64 / total as f64) * 100.0).round() as u8;
    percent
}

/// Computes the full snapshot for one refresh.
#[must_use]
pub fn snapshot(data: &DashboardData) -> AggregateSnapshot {
    let violating_surveys = data
        .surveys
        .iter()
        .filter(|s| s.total_violations > 0)
        .count() as u64;

    // Standalone violation records are the authoritative severity
    // source when the backend exposes them; surveys embed the same
    // notes, so using both would double count.
    let severity = if data.violations.is_empty() {
        severity_breakdown(&data.surveys)
    } else {
        severity_breakdown(&data.violations)
    };

    let departments = data
        .complaints
        .iter()
        .map(|c| c.category.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64;

    AggregateSnapshot {
        complaints: status_counts(&data.complaints),
        verifications: status_counts(&data.verifications),
        approvals: status_counts(&data.approvals),
        surveys: status_counts(&data.surveys),
        violations: status_counts(&data.violations),
        avg_resolution: average_resolution_time(&data.complaints),
        top_wards: rank_wards(&data.surveys, RANKING_LIMIT),
        severity,
        top_categories: rank_categories(&data.complaints, RANKING_LIMIT),
        compliance_percent: compliance_percentage(data.surveys.len() as u64, violating_surveys),
        active_officers: data.complaints.iter().filter(|c| c.is_assigned()).count() as u64,
        departments,
    }
}

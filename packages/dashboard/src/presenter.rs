//! Display-row selection and ordering.
//!
//! No aggregation logic lives here — only selection, explicit
//! timestamp ordering, and truncation to a display limit.

use std::cmp::Ordering;

use civic_desk_dashboard_models::RecentRow;
use civic_desk_records_models::NormalizedRecord;

/// How many rows the recent-records list shows.
pub const RECENT_LIMIT: usize = 4;

/// Orders two records by submission time, newest first; records lacking
/// a timestamp sort last.
fn newest_first(a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
    match (a.submitted_at, b.submitted_at) {
        (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Selects the `limit` most recent records as display rows.
#[must_use]
pub fn recent_rows(records: &[NormalizedRecord], limit: usize) -> Vec<RecentRow> {
    let mut sorted: Vec<&NormalizedRecord> = records.iter().collect();
    sorted.sort_by(|a, b| newest_first(a, b));
    sorted
        .into_iter()
        .take(limit)
        .map(|record| RecentRow {
            id: record.id.clone(),
            title: record.title.clone(),
            priority: record.priority.to_string(),
            status: record.status.to_string(),
            department: record.category.clone(),
            date: record.submitted_display(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use civic_desk_records_models::{Priority, RecordKind, Status};

    use super::*;

    fn complaint(id: &str, day: Option<u32>) -> NormalizedRecord {
        NormalizedRecord {
            id: id.into(),
            kind: RecordKind::Complaint,
            title: format!("Complaint {id}"),
            description: String::new(),
            status: Status::New,
            category: "General".into(),
            ward: "Unknown".into(),
            zone: "Unknown".into(),
            submitted_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()),
            resolved_at: None,
            priority: Priority::Medium,
            assignee: NormalizedRecord::UNASSIGNED.into(),
            updates: Vec::new(),
            violations: Vec::new(),
            total_violations: 0,
            compliance_score: None,
        }
    }

    #[test]
    fn rows_sort_newest_first_and_truncate() {
        let records = [
            complaint("A", Some(3)),
            complaint("B", Some(20)),
            complaint("C", Some(11)),
            complaint("D", Some(1)),
            complaint("E", Some(15)),
        ];
        let rows = recent_rows(&records, RECENT_LIMIT);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["B", "E", "C", "A"]);
    }

    #[test]
    fn timestampless_records_sort_last() {
        let records = [
            complaint("A", None),
            complaint("B", Some(5)),
            complaint("C", None),
        ];
        let rows = recent_rows(&records, 10);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["B", "A", "C"]);
        assert_eq!(rows[0].date, "05/01/2024");
        assert_eq!(rows[1].date, "Not available");
    }

    #[test]
    fn rows_carry_display_labels() {
        let rows = recent_rows(&[complaint("A", Some(5))], 1);
        assert_eq!(rows[0].priority, "Medium");
        assert_eq!(rows[0].status, "New");
        assert_eq!(rows[0].department, "General");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(recent_rows(&[], RECENT_LIMIT).is_empty());
    }
}

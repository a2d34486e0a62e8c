//! Projection of raw backend records into [`NormalizedRecord`]s.

use civic_desk_records_models::{
    NormalizedRecord, RecordKind, Severity, Status, StatusUpdate, ViolationNote,
};

use crate::alias;
use crate::extract::{first_datetime, first_f64, first_str, first_string, first_u64};

/// Normalizes one raw record of `kind`.
///
/// Every canonical attribute is resolved through its alias table and
/// falls back to a kind-appropriate default; nothing in the input can
/// make this fail. Normalizing an already-normalized record returns it
/// unchanged.
#[must_use]
pub fn normalize(kind: RecordKind, raw: &serde_json::Value) -> NormalizedRecord {
    let id = first_string(raw, alias::ID).unwrap_or_else(|| "N/A".to_owned());

    let description = first_str(raw, alias::DESCRIPTION).unwrap_or_default().to_owned();
    let title = first_str(raw, alias::TITLE)
        .map(str::to_owned)
        .or_else(|| (!description.is_empty()).then(|| description.clone()))
        .unwrap_or_else(|| "No Title".to_owned());

    let status = first_str(raw, alias::STATUS)
        .map_or_else(|| Status::initial(kind), |s| Status::parse_for_kind(s, kind));

    let mut violations = violation_notes(raw);
    // A standalone violation record carries its severity at the top
    // level instead of in a sub-list; project it into one note so the
    // severity aggregates see it.
    if kind == RecordKind::Violation
        && violations.is_empty()
        && let Some(severity) = first_str(raw, &["severity"]).and_then(|s| s.parse().ok())
    {
        violations.push(ViolationNote {
            severity,
            violation_type: first_str(raw, alias::VIOLATION_TYPE)
                .unwrap_or("unknown")
                .to_owned(),
        });
    }
    let total_violations =
        first_u64(raw, alias::TOTAL_VIOLATIONS).unwrap_or_else(|| violations.len() as u64);

    NormalizedRecord {
        id,
        kind,
        title,
        description,
        status,
        category: first_str(raw, alias::CATEGORY)
            .unwrap_or("General")
            .to_owned(),
        ward: first_string(raw, alias::WARD).unwrap_or_else(|| "Unknown".to_owned()),
        zone: first_str(raw, alias::ZONE).unwrap_or("Unknown").to_owned(),
        submitted_at: first_datetime(raw, alias::SUBMITTED),
        resolved_at: first_datetime(raw, alias::RESOLVED),
        priority: first_str(raw, alias::PRIORITY)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        assignee: first_str(raw, alias::ASSIGNEE)
            .unwrap_or(NormalizedRecord::UNASSIGNED)
            .to_owned(),
        updates: status_timeline(kind, raw),
        violations,
        total_violations,
        compliance_score: first_f64(raw, alias::COMPLIANCE),
    }
}

/// Normalizes a whole collection, logging how many records degraded to
/// a default identifier.
#[must_use]
pub fn normalize_collection(
    kind: RecordKind,
    raw: &[serde_json::Value],
) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = raw.iter().map(|r| normalize(kind, r)).collect();
    let unidentified = records.iter().filter(|r| r.id == "N/A").count();
    if unidentified > 0 {
        log::warn!("{unidentified} {kind} record(s) arrived without an identifier");
    }
    records
}

/// Extracts the chronological status timeline, skipping entries that
/// are not objects.
fn status_timeline(kind: RecordKind, raw: &serde_json::Value) -> Vec<StatusUpdate> {
    let Some(entries) = crate::extract::first_value(raw, alias::UPDATES)
        .and_then(serde_json::Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| StatusUpdate {
            at: first_datetime(entry, alias::UPDATE_AT),
            status: first_str(entry, alias::STATUS)
                .map_or_else(|| Status::initial(kind), |s| Status::parse_for_kind(s, kind)),
            message: first_str(entry, &["message", "notes"])
                .unwrap_or_default()
                .to_owned(),
            officer: first_str(entry, alias::UPDATE_OFFICER)
                .unwrap_or("System")
                .to_owned(),
        })
        .collect()
}

/// Extracts the violation sub-list. A malformed entry degrades to a
/// medium-severity note rather than dropping the violation.
fn violation_notes(raw: &serde_json::Value) -> Vec<ViolationNote> {
    let Some(entries) = crate::extract::first_value(raw, alias::VIOLATIONS)
        .and_then(serde_json::Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| ViolationNote {
            severity: first_str(entry, &["severity"])
                .and_then(|s| s.parse().ok())
                .unwrap_or(Severity::Medium),
            violation_type: first_str(entry, alias::VIOLATION_TYPE)
                .unwrap_or("unknown")
                .to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use civic_desk_records_models::Priority;
    use serde_json::json;

    use super::*;

    #[test]
    fn complaint_normalizes_with_aliases() {
        let raw = json!({
            "id": "GRV123",
            "title": "Pothole on MG Road",
            "description": "Deep pothole",
            "status": "Under Review",
            "category": "Road Issues",
            "ward": "Ward 5",
            "zone": "Central Zone",
            "created_at": "2024-01-10T09:00:00",
            "priority": "High",
            "assignedTo": "R. Verma",
            "updates": [
                { "date": "2024-01-10T09:00:00", "status": "New",
                  "message": "Complaint registered successfully", "officer": "System" }
            ]
        });

        let record = normalize(RecordKind::Complaint, &raw);
        assert_eq!(record.id, "GRV123");
        assert_eq!(record.status, Status::UnderReview);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.assignee, "R. Verma");
        assert_eq!(record.submitted_at.unwrap().to_string(), "2024-01-10 09:00:00 UTC");
        assert_eq!(record.updates.len(), 1);
        assert_eq!(record.updates[0].officer, "System");
    }

    #[test]
    fn empty_record_fills_every_default() {
        let record = normalize(RecordKind::Complaint, &json!({}));
        assert_eq!(record.id, "N/A");
        assert_eq!(record.title, "No Title");
        assert_eq!(record.status, Status::New);
        assert_eq!(record.category, "General");
        assert_eq!(record.ward, "Unknown");
        assert_eq!(record.zone, "Unknown");
        assert_eq!(record.priority, Priority::Medium);
        assert_eq!(record.assignee, "Unassigned");
        assert!(record.submitted_at.is_none());
        assert_eq!(record.submitted_display(), "Not available");
        assert_eq!(record.total_violations, 0);
    }

    #[test]
    fn title_falls_back_to_description() {
        let record = normalize(
            RecordKind::Complaint,
            &json!({ "description": "Streetlight out" }),
        );
        assert_eq!(record.title, "Streetlight out");
    }

    #[test]
    fn out_of_vocabulary_status_defaults_to_initial() {
        let record = normalize(
            RecordKind::PropertyVerification,
            &json!({ "status": "Somewhere In Between" }),
        );
        assert_eq!(record.status, Status::Pending);
    }

    #[test]
    fn unparseable_date_degrades_to_none() {
        let record = normalize(
            RecordKind::Complaint,
            &json!({ "submitted_at": "yesterday-ish" }),
        );
        assert!(record.submitted_at.is_none());
        assert_eq!(record.submitted_display(), "Not available");
    }

    #[test]
    fn survey_without_total_violations_counts_its_list() {
        let raw = json!({
            "id": "SUR001",
            "ward_no": 5,
            "violations": [
                { "severity": "high", "type": "height_violation" },
                { "severity": "low", "type": "setback_violation" }
            ]
        });
        let record = normalize(RecordKind::Survey, &raw);
        assert_eq!(record.total_violations, 2);
        assert_eq!(record.ward, "5");
        assert_eq!(record.violations[0].severity, Severity::High);
        assert_eq!(record.violations[0].violation_type, "height_violation");
    }

    #[test]
    fn survey_with_nothing_violation_related_sums_to_zero() {
        let record = normalize(RecordKind::Survey, &json!({ "id": "SUR002" }));
        assert_eq!(record.total_violations, 0);
        assert!(record.violations.is_empty());
        assert!(record.compliance_score.is_none());
    }

    #[test]
    fn malformed_violation_entries_degrade_not_drop() {
        let raw = json!({
            "violations": [
                { "severity": "bogus" },
                "not-an-object",
                { "type": "encroachment" }
            ]
        });
        let record = normalize(RecordKind::Violation, &raw);
        assert_eq!(record.violations.len(), 2);
        assert_eq!(record.violations[0].severity, Severity::Medium);
        assert_eq!(record.violations[0].violation_type, "unknown");
        assert_eq!(record.violations[1].violation_type, "encroachment");
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({
            "complaint_id": "GRV900",
            "title": "Garbage pileup",
            "status": "In Progress",
            "category": "Garbage Collection",
            "ward_no": 7,
            "zone_type": "North Zone",
            "submitted_date": "2024-03-02",
            "assignedTo": "S. Khan",
            "priority": "low",
            "updates": [
                { "timestamp": "2024-03-03T10:00:00", "status": "In Progress",
                  "notes": "Crew dispatched", "updated_by": "S. Khan" }
            ],
            "violations": [{ "severity": "HIGH", "type": "dumping" }]
        });

        let once = normalize(RecordKind::Complaint, &raw);
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize(RecordKind::Complaint, &serialized);
        assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_for_every_kind_on_sparse_input() {
        for kind in [
            RecordKind::Complaint,
            RecordKind::PropertyVerification,
            RecordKind::BuildingApproval,
            RecordKind::Survey,
            RecordKind::Violation,
        ] {
            let once = normalize(kind, &json!({ "status": "nonsense" }));
            let serialized = serde_json::to_value(&once).unwrap();
            assert_eq!(once, normalize(kind, &serialized));
        }
    }

    #[test]
    fn violation_record_uses_detected_at_and_lowercase_status() {
        let raw = json!({
            "id": "ILL010",
            "violation_type": "height_violation",
            "severity": "high",
            "ward_no": 3,
            "detected_at": "2024-02-20T08:15:00",
            "status": "under_investigation"
        });
        let record = normalize(RecordKind::Violation, &raw);
        assert_eq!(record.status, Status::UnderInvestigation);
        assert_eq!(record.category, "height_violation");
        assert!(record.submitted_at.is_some());
        // Top-level severity is projected into a one-element sub-list.
        assert_eq!(record.violations.len(), 1);
        assert_eq!(record.violations[0].severity, Severity::High);
        assert_eq!(record.violations[0].violation_type, "height_violation");
        assert_eq!(record.total_violations, 1);
    }
}

//! Declared field-name alias tables.
//!
//! Each canonical attribute lists its accepted raw field names, primary
//! name first; the first present, non-null name wins. Keeping the
//! tables in one place means the inconsistent naming across backend
//! endpoints (`assigned_to` vs `assignedTo`, `submitted_at` vs
//! `created_at`) is resolved exactly once, at normalization time.
//!
//! The primary name of every table matches the serialized field name of
//! the normalized record, which is what makes normalization idempotent.

/// Record identifier.
pub const ID: &[&str] = &["id", "complaint_id", "ticket_number", "survey_id"];

/// Short title. Approvals carry a `project` label, verifications only
/// the citizen's name, surveys only a ward label.
pub const TITLE: &[&str] = &["title", "project", "citizen", "applicant", "ward_name"];

/// Longer description.
pub const DESCRIPTION: &[&str] = &["description", "details"];

/// Status value (closed vocabulary).
pub const STATUS: &[&str] = &["status"];

/// Category / department classification.
pub const CATEGORY: &[&str] = &["category", "document_type", "violation_type", "survey_type"];

/// Ward label or number.
pub const WARD: &[&str] = &["ward", "ward_no", "ward_name"];

/// Zone label.
pub const ZONE: &[&str] = &["zone", "zone_type"];

/// Submission timestamp.
pub const SUBMITTED: &[&str] = &[
    "submitted_at",
    "created_at",
    "submittedAt",
    "detected_at",
    "submitted_date",
    "survey_date",
];

/// Resolution timestamp.
pub const RESOLVED: &[&str] = &["resolved_at", "verified_at", "approved_at", "resolvedAt"];

/// Triage priority.
pub const PRIORITY: &[&str] = &["priority"];

/// Assigned officer.
pub const ASSIGNEE: &[&str] = &[
    "assignee",
    "assigned_to",
    "assignedTo",
    "officer",
    "verified_by",
    "approved_by",
    "officer_name",
];

/// Status timeline array.
pub const UPDATES: &[&str] = &["updates"];

/// Timestamp of one timeline entry.
pub const UPDATE_AT: &[&str] = &["date", "at", "timestamp"];

/// Actor of one timeline entry.
pub const UPDATE_OFFICER: &[&str] = &["officer", "actor", "updated_by"];

/// Violation sub-list.
pub const VIOLATIONS: &[&str] = &["violations"];

/// Violation type within a sub-list entry.
pub const VIOLATION_TYPE: &[&str] = &["violation_type", "type"];

/// Violation count.
pub const TOTAL_VIOLATIONS: &[&str] = &["total_violations", "totalViolations"];

/// Compliance score in percent.
pub const COMPLIANCE: &[&str] = &["compliance_score", "compliance_rate"];

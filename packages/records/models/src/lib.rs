#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical record types shared by the normalizer and the dashboard.
//!
//! This crate defines the closed status vocabulary used across the
//! entire system, the severity and priority scales, and the
//! [`NormalizedRecord`] projection that every raw backend record is
//! reduced to. Records from different backend endpoints use
//! inconsistent shapes; this is the one shape everything downstream
//! agrees on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The five record kinds the dashboard ingests.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// Citizen grievance.
    Complaint,
    /// Property document verification request.
    PropertyVerification,
    /// Building approval application.
    BuildingApproval,
    /// Ward field survey.
    Survey,
    /// Detected illegal-construction violation.
    Violation,
}

/// Coarse status grouping used for top-level dashboard counts.
///
/// Merging `New` and `Under Review` into one pending bucket is a
/// deliberate product simplification; the vocabulary and timelines keep
/// them distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    /// Not yet picked up (`New`, `Under Review`, `Pending`, `detected`).
    Pending,
    /// Being worked (`In Progress`, `under_investigation`).
    InProgress,
    /// Successfully concluded (`Resolved`, `Approved`, `completed`).
    Resolved,
    /// Everything else (`Closed`, `Rejected`, `escalated`).
    Other,
}

/// The closed status vocabulary.
///
/// Wire spellings are preserved exactly: complaint and review statuses
/// are title-cased, violation and survey statuses are lower-cased. A
/// raw value outside a kind's allowed set falls back to that kind's
/// initial status at normalization time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Status {
    /// Complaint registered, not yet looked at.
    New,
    /// Complaint picked up for triage.
    #[serde(rename = "Under Review")]
    #[strum(to_string = "Under Review")]
    UnderReview,
    /// Work underway (complaints; surveys use the `in_progress`
    /// spelling).
    #[serde(rename = "In Progress", alias = "in_progress")]
    #[strum(to_string = "In Progress", serialize = "in_progress")]
    InProgress,
    /// Concluded successfully (complaints; violations use the
    /// `resolved` spelling).
    #[serde(alias = "resolved")]
    #[strum(to_string = "Resolved", serialize = "resolved")]
    Resolved,
    /// Closed without resolution.
    Closed,
    /// Awaiting review (verifications/approvals; surveys use the
    /// `pending` spelling).
    #[serde(alias = "pending")]
    #[strum(to_string = "Pending", serialize = "pending")]
    Pending,
    /// Verification or approval granted.
    Approved,
    /// Verification or approval declined.
    Rejected,
    /// Violation freshly detected.
    #[serde(rename = "detected")]
    #[strum(to_string = "detected")]
    Detected,
    /// Violation under investigation.
    #[serde(rename = "under_investigation")]
    #[strum(to_string = "under_investigation")]
    UnderInvestigation,
    /// Violation escalated to enforcement.
    #[serde(rename = "escalated")]
    #[strum(to_string = "escalated")]
    Escalated,
    /// Survey finished and analyzed.
    #[serde(rename = "completed")]
    #[strum(to_string = "completed")]
    Completed,
}

impl Status {
    /// The allowed status set for `kind`.
    #[must_use]
    pub const fn allowed_for(kind: RecordKind) -> &'static [Self] {
        match kind {
            RecordKind::Complaint => &[
                Self::New,
                Self::UnderReview,
                Self::InProgress,
                Self::Resolved,
                Self::Closed,
            ],
            RecordKind::PropertyVerification | RecordKind::BuildingApproval => {
                &[Self::Pending, Self::Approved, Self::Rejected]
            }
            RecordKind::Survey => &[Self::Pending, Self::InProgress, Self::Completed],
            RecordKind::Violation => &[
                Self::Detected,
                Self::UnderInvestigation,
                Self::Resolved,
                Self::Escalated,
            ],
        }
    }

    /// The initial status a fresh record of `kind` carries.
    #[must_use]
    pub const fn initial(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Complaint => Self::New,
            RecordKind::PropertyVerification
            | RecordKind::BuildingApproval
            | RecordKind::Survey => Self::Pending,
            RecordKind::Violation => Self::Detected,
        }
    }

    /// Parses a raw status value against `kind`'s allowed set, falling
    /// back to the kind's initial status for anything outside the
    /// closed vocabulary.
    #[must_use]
    pub fn parse_for_kind(raw: &str, kind: RecordKind) -> Self {
        raw.parse::<Self>()
            .ok()
            .filter(|s| Self::allowed_for(kind).contains(s))
            .unwrap_or_else(|| Self::initial(kind))
    }

    /// The coarse bucket this status counts toward.
    #[must_use]
    pub const fn bucket(self) -> StatusBucket {
        match self {
            Self::New | Self::UnderReview | Self::Pending | Self::Detected => {
                StatusBucket::Pending
            }
            Self::InProgress | Self::UnderInvestigation => StatusBucket::InProgress,
            Self::Resolved | Self::Approved | Self::Completed => StatusBucket::Resolved,
            Self::Closed | Self::Rejected | Self::Escalated => StatusBucket::Other,
        }
    }
}

/// Priority assigned to a record by triage.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    /// Urgent attention.
    #[serde(alias = "high")]
    High,
    /// Default for new records.
    #[default]
    #[serde(alias = "medium")]
    Medium,
    /// Can wait.
    #[serde(alias = "low")]
    Low,
}

/// Severity of a detected violation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    /// Demolition-grade violation.
    High,
    /// Needs corrective action.
    Medium,
    /// Minor deviation.
    Low,
}

impl Severity {
    /// Returns all severity levels, highest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Medium, Self::Low]
    }
}

/// One entry in a record's chronological status timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// When the update was recorded.
    #[serde(rename = "date")]
    pub at: Option<DateTime<Utc>>,
    /// Status after the update.
    pub status: Status,
    /// Free-form update message.
    pub message: String,
    /// Officer or system actor who recorded it.
    pub officer: String,
}

/// A violation noted against a survey or standalone violation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationNote {
    /// How serious the violation is.
    pub severity: Severity,
    /// What rule was broken (e.g. `height_violation`).
    pub violation_type: String,
}

/// Display sentinel for missing or unparseable timestamps.
pub const TIMESTAMP_UNAVAILABLE: &str = "Not available";

/// The canonical, default-filled projection of one raw backend record.
///
/// Every field holds a usable value — the aggregation engine never has
/// to ask whether an upstream record omitted something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Backend identifier (`"N/A"` when absent).
    pub id: String,
    /// Which collection the record came from.
    pub kind: RecordKind,
    /// Short title (`"No Title"` when absent).
    pub title: String,
    /// Longer description (empty when absent).
    pub description: String,
    /// Status from the closed vocabulary.
    pub status: Status,
    /// Category / department (`"General"` when absent).
    pub category: String,
    /// Ward label (`"Unknown"` when absent).
    pub ward: String,
    /// Zone label (`"Unknown"` when absent).
    pub zone: String,
    /// When the record was submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the record was resolved, if it was.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Triage priority (`Medium` when absent).
    pub priority: Priority,
    /// Assigned officer (`"Unassigned"` when absent).
    pub assignee: String,
    /// Chronological status timeline.
    pub updates: Vec<StatusUpdate>,
    /// Violations noted against this record.
    pub violations: Vec<ViolationNote>,
    /// Violation count (0 when absent; falls back to the list length).
    pub total_violations: u64,
    /// Compliance score in percent, where reported.
    pub compliance_score: Option<f64>,
}

impl NormalizedRecord {
    /// Default value applied when an assignee is absent.
    pub const UNASSIGNED: &'static str = "Unassigned";

    /// Returns `true` when an officer has been assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.assignee != Self::UNASSIGNED
    }

    /// Submission date for display (`"Not available"` when unknown).
    #[must_use]
    pub fn submitted_display(&self) -> String {
        self.submitted_at.map_or_else(
            || TIMESTAMP_UNAVAILABLE.to_owned(),
            |dt| dt.format("%d/%m/%Y").to_string(),
        )
    }

    /// Resolution date for display (`"Not available"` when unknown).
    #[must_use]
    pub fn resolved_display(&self) -> String {
        self.resolved_at.map_or_else(
            || TIMESTAMP_UNAVAILABLE.to_owned(),
            |dt| dt.format("%d/%m/%Y").to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_spellings_round_trip() {
        for (status, wire) in [
            (Status::New, "New"),
            (Status::UnderReview, "Under Review"),
            (Status::InProgress, "In Progress"),
            (Status::Resolved, "Resolved"),
            (Status::Closed, "Closed"),
            (Status::Pending, "Pending"),
            (Status::Approved, "Approved"),
            (Status::Rejected, "Rejected"),
            (Status::Detected, "detected"),
            (Status::UnderInvestigation, "under_investigation"),
            (Status::Escalated, "escalated"),
            (Status::Completed, "completed"),
        ] {
            assert_eq!(status.to_string(), wire);
            assert_eq!(wire.parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn lowercase_violation_spellings_parse() {
        assert_eq!("resolved".parse::<Status>().unwrap(), Status::Resolved);
        assert_eq!("pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
    }

    #[test]
    fn out_of_vocabulary_status_falls_back_to_initial() {
        assert_eq!(
            Status::parse_for_kind("Escalated To Mayor", RecordKind::Complaint),
            Status::New
        );
        assert_eq!(
            Status::parse_for_kind("Resolved", RecordKind::PropertyVerification),
            Status::Pending
        );
        assert_eq!(
            Status::parse_for_kind("detected", RecordKind::Violation),
            Status::Detected
        );
    }

    #[test]
    fn allowed_status_passes_through() {
        assert_eq!(
            Status::parse_for_kind("Under Review", RecordKind::Complaint),
            Status::UnderReview
        );
        assert_eq!(
            Status::parse_for_kind("under_investigation", RecordKind::Violation),
            Status::UnderInvestigation
        );
    }

    #[test]
    fn pending_bucket_merges_new_and_under_review() {
        assert_eq!(Status::New.bucket(), StatusBucket::Pending);
        assert_eq!(Status::UnderReview.bucket(), StatusBucket::Pending);
        assert_eq!(Status::InProgress.bucket(), StatusBucket::InProgress);
        assert_eq!(Status::Resolved.bucket(), StatusBucket::Resolved);
        assert_eq!(Status::Closed.bucket(), StatusBucket::Other);
    }

    #[test]
    fn every_allowed_status_has_a_bucket() {
        for kind in [
            RecordKind::Complaint,
            RecordKind::PropertyVerification,
            RecordKind::BuildingApproval,
            RecordKind::Survey,
            RecordKind::Violation,
        ] {
            for status in Status::allowed_for(kind) {
                // Exhaustiveness is enforced by the match; this pins the
                // initial status into the pending bucket for every kind.
                let _ = status.bucket();
            }
            assert_eq!(Status::initial(kind).bucket(), StatusBucket::Pending);
        }
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::High.to_string(), "high");
        assert_eq!("MEDIUM".parse::<Severity>().unwrap(), Severity::Medium);
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the civic backend.
//!
//! The backend is an external collaborator reached only through its
//! request/response contracts: multipart submission endpoints, a
//! tracking lookup, form-encoded status updates, and the admin
//! dashboard envelope. This crate implements those contracts and plugs
//! into the intake and dashboard seams
//! ([`civic_desk_intake::SubmissionTransport`],
//! [`civic_desk_dashboard::SnapshotSource`]).

pub mod client;

use civic_desk_intake_models::IntakeKind;
use thiserror::Error;

pub use client::{
    ApiClient, ApprovalDecision, ComplaintStatusUpdate, RawDashboard, VerificationReview,
    ViolationStatusUpdate,
};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "CIVIC_DESK_API_URL";

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before producing a usable response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON shape the contract promises.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A lookup-by-id endpoint answered 404: a valid-but-nonexistent
    /// key, a distinct user-facing state rather than a failure.
    #[error("record not found")]
    NotFound,

    /// The backend answered with an error payload (any non-2xx other
    /// than a lookup 404).
    #[error("backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// The backend's `detail` message.
        detail: String,
    },
}

/// Backend endpoint URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Creates endpoints rooted at `base` (no trailing slash needed).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Reads the base URL from `CIVIC_DESK_API_URL`, falling back to
    /// the local development default.
    #[must_use]
    pub fn from_env() -> Self {
        let base =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::new(base)
    }

    /// Submission endpoint for one intake kind.
    #[must_use]
    pub fn submission(&self, kind: IntakeKind) -> String {
        let path = match kind {
            IntakeKind::Complaint => "/api/complaints/register",
            IntakeKind::PropertyVerification => "/api/property/verify",
            IntakeKind::BuildingApproval => "/api/building/approval",
            IntakeKind::Survey => "/api/surveys/start",
        };
        format!("{}{path}", self.base)
    }

    /// Complaint tracking lookup.
    #[must_use]
    pub fn track_complaint(&self, id: &str) -> String {
        format!("{}/api/complaints/track/{id}", self.base)
    }

    /// Admin dashboard envelope.
    #[must_use]
    pub fn admin_dashboard(&self) -> String {
        format!("{}/api/admin/dashboard", self.base)
    }

    /// Complaint status update.
    #[must_use]
    pub fn complaint_status(&self, id: &str) -> String {
        format!("{}/api/complaints/{id}/status", self.base)
    }

    /// Property verification review.
    #[must_use]
    pub fn verification_review(&self, id: &str) -> String {
        format!("{}/api/property/verifications/{id}/verify", self.base)
    }

    /// Building approval decision.
    #[must_use]
    pub fn approval_decision(&self, id: &str) -> String {
        format!("{}/api/building/approvals/{id}/approve", self.base)
    }

    /// Violation status update.
    #[must_use]
    pub fn violation_status(&self, id: &str) -> String {
        format!("{}/api/illegal-constructions/{id}/status", self.base)
    }
}

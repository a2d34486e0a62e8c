#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Multi-step intake workflow.
//!
//! Collects heterogeneous, partially-required field sets across
//! sequential steps with per-step validation gating and cross-step
//! state retention, then encodes the completed draft into a transport
//! payload. Actual delivery happens behind the [`SubmissionTransport`]
//! trait so tests substitute in-memory fakes.

pub mod encode;
pub mod validate;
pub mod workflow;

use async_trait::async_trait;
use civic_desk_intake_models::IntakeKind;
use thiserror::Error;

pub use encode::SubmissionPayload;
pub use validate::ErrorMap;
pub use workflow::IntakeSession;

/// Failure of the transport call that delivers a submission.
///
/// Distinct from validation failure: the draft was complete and valid,
/// only delivery went wrong, and the attempt is safely retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a usable response (network, TLS,
    /// timeout, malformed body).
    #[error("submission request failed: {message}")]
    Failed {
        /// Description of what went wrong.
        message: String,
    },

    /// The backend answered with an error payload.
    #[error("backend rejected the submission: {detail}")]
    Rejected {
        /// The backend's `detail` message.
        detail: String,
    },
}

/// Successful submission acknowledgement from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Backend-assigned identifier (`complaint_id` / `ticket_number`).
    pub ticket: String,
    /// Human-readable confirmation message, if any.
    pub message: String,
}

/// Delivers an encoded submission to the backend.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Sends the payload and returns the backend's receipt.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when delivery fails or the backend
    /// rejects the submission.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, TransportError>;
}

/// Errors surfaced by intake workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// The field key is not part of this intake kind's schema.
    #[error("unknown field {key:?} for {kind} intake")]
    UnknownField {
        /// The intake kind whose schema was consulted.
        kind: IntakeKind,
        /// The offending field key.
        key: String,
    },

    /// The current step's required fields did not all validate; the
    /// per-field messages are in the session's error map.
    #[error("the current step has {count} validation error(s)")]
    ValidationFailed {
        /// Number of blocking fields.
        count: usize,
    },

    /// `advance` was called on the final step; the final step submits
    /// instead of advancing.
    #[error("already on the final step")]
    AtFinalStep,

    /// `submit` was called before reaching the final step.
    #[error("submit is only available on the final step")]
    NotAtFinalStep,

    /// A submission attempt is already in flight; the second attempt is
    /// rejected, never queued.
    #[error("a submission attempt is already in flight")]
    SubmissionInFlight,

    /// The session already submitted successfully.
    #[error("this intake was already submitted")]
    AlreadySubmitted,

    /// Delivery failed; the session stays on the final step with the
    /// draft intact so no input is lost.
    #[error("submission failed: {0}")]
    Transport(#[from] TransportError),
}

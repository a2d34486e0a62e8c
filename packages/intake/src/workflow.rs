//! Intake workflow state machine.
//!
//! One [`IntakeSession`] owns the draft, the current step, and the
//! per-field error map for a single citizen intake. Transitions:
//! `advance` (guarded by validation of the current step), `back`
//! (unguarded), and `submit` (final step only, guarded, at most one
//! attempt in flight).

use civic_desk_intake_models::{
    Attachment, DraftRecord, FieldValue, IntakeKind, IntakeSchema,
};

use crate::encode::{SubmissionPayload, encode};
use crate::validate::{ErrorMap, validate_step};
use crate::{IntakeError, SubmissionReceipt, SubmissionTransport, TransportError};

/// Where the session stands with respect to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// The citizen is still filling in the form.
    Editing,
    /// One submission attempt is in flight; further transitions are
    /// rejected until it resolves.
    InFlight,
    /// The backend acknowledged the submission.
    Completed,
}

/// A single intake session: schema, draft, step position, and errors.
///
/// Exclusively owned by one logical flow; discarded on submission or
/// navigation away.
#[derive(Debug)]
pub struct IntakeSession {
    schema: IntakeSchema,
    draft: DraftRecord,
    step: usize,
    errors: ErrorMap,
    state: SubmissionState,
}

impl IntakeSession {
    /// Starts a new session at step 1 with an empty draft.
    #[must_use]
    pub fn new(schema: IntakeSchema) -> Self {
        Self {
            schema,
            draft: DraftRecord::new(),
            step: 1,
            errors: ErrorMap::new(),
            state: SubmissionState::Editing,
        }
    }

    /// Starts a new session for `kind`.
    #[must_use]
    pub fn for_kind(kind: IntakeKind) -> Self {
        Self::new(IntakeSchema::for_kind(kind))
    }

    /// The schema driving this session.
    #[must_use]
    pub const fn schema(&self) -> &IntakeSchema {
        &self.schema
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    /// Current 1-based step.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Total number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.schema.step_count()
    }

    /// Returns `true` on the terminal step, where `submit` replaces
    /// `advance`.
    #[must_use]
    pub fn is_final_step(&self) -> bool {
        self.step == self.schema.step_count()
    }

    /// The error map from the most recent validation pass.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Submission state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Sets a field value.
    ///
    /// The field's error entry is cleared the instant its value changes
    /// away from empty — immediate feedback, independent of the next
    /// full validation pass.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownField`] for keys outside the
    /// schema and [`IntakeError::SubmissionInFlight`] while a
    /// submission attempt is pending.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> Result<(), IntakeError> {
        self.ensure_editable()?;
        if self.schema.field(key).is_none() {
            return Err(IntakeError::UnknownField {
                kind: self.schema.kind,
                key: key.to_owned(),
            });
        }
        if !value.is_empty() {
            self.errors.remove(key);
        }
        self.draft.set(key, value);
        Ok(())
    }

    /// Appends one binary to a multi-upload slot, clearing the slot's
    /// error entry.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::set_field`].
    pub fn push_attachment(&mut self, key: &str, attachment: Attachment) -> Result<(), IntakeError> {
        self.ensure_editable()?;
        if self.schema.field(key).is_none() {
            return Err(IntakeError::UnknownField {
                kind: self.schema.kind,
                key: key.to_owned(),
            });
        }
        self.errors.remove(key);
        self.draft.push_attachment(key, attachment);
        Ok(())
    }

    /// Removes the attachment at `index` from a multi-upload slot.
    /// Frozen (non-editing) sessions remove nothing.
    pub fn remove_attachment(&mut self, key: &str, index: usize) -> Option<Attachment> {
        if self.state != SubmissionState::Editing {
            return None;
        }
        self.draft.remove_attachment(key, index)
    }

    /// Validates the current step, replacing the error map.
    pub fn validate_current(&mut self) -> &ErrorMap {
        if let Some(step) = self.schema.step(self.step) {
            self.errors = validate_step(&self.draft, step);
        }
        &self.errors
    }

    /// Advances to the next step if the current one validates.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ValidationFailed`] (with the per-field
    /// messages left in [`Self::errors`]), [`IntakeError::AtFinalStep`]
    /// on the terminal step, or [`IntakeError::SubmissionInFlight`].
    pub fn advance(&mut self) -> Result<usize, IntakeError> {
        self.ensure_editable()?;
        if self.is_final_step() {
            return Err(IntakeError::AtFinalStep);
        }
        self.validate_current();
        if !self.errors.is_empty() {
            return Err(IntakeError::ValidationFailed {
                count: self.errors.len(),
            });
        }
        self.step += 1;
        Ok(self.step)
    }

    /// Steps back without re-validation. Already-entered values are
    /// retained; stays put on step 1.
    pub fn back(&mut self) -> usize {
        if self.state == SubmissionState::Editing && self.step > 1 {
            self.step -= 1;
            self.errors.clear();
        }
        self.step
    }

    /// Validates the final step and, on success, encodes the draft and
    /// marks one submission attempt in flight.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NotAtFinalStep`],
    /// [`IntakeError::ValidationFailed`],
    /// [`IntakeError::SubmissionInFlight`] (a second attempt while one
    /// is pending is rejected, never queued), or
    /// [`IntakeError::AlreadySubmitted`].
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, IntakeError> {
        match self.state {
            SubmissionState::InFlight => return Err(IntakeError::SubmissionInFlight),
            SubmissionState::Completed => return Err(IntakeError::AlreadySubmitted),
            SubmissionState::Editing => {}
        }
        if !self.is_final_step() {
            return Err(IntakeError::NotAtFinalStep);
        }
        self.validate_current();
        if !self.errors.is_empty() {
            return Err(IntakeError::ValidationFailed {
                count: self.errors.len(),
            });
        }
        self.state = SubmissionState::InFlight;
        Ok(encode(&self.schema, &self.draft))
    }

    /// Resolves the in-flight attempt started by [`Self::begin_submit`].
    ///
    /// On success the session is completed. On transport failure the
    /// session returns to editing on the final step with the draft
    /// intact, so the attempt can be retried without re-entering
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Transport`] when the outcome was a
    /// failure.
    pub fn complete_submit(
        &mut self,
        outcome: Result<SubmissionReceipt, TransportError>,
    ) -> Result<SubmissionReceipt, IntakeError> {
        match outcome {
            Ok(receipt) => {
                self.state = SubmissionState::Completed;
                log::info!(
                    "{} intake submitted, ticket {}",
                    self.schema.kind,
                    receipt.ticket
                );
                Ok(receipt)
            }
            Err(err) => {
                self.state = SubmissionState::Editing;
                log::warn!("{} intake submission failed: {err}", self.schema.kind);
                Err(IntakeError::Transport(err))
            }
        }
    }

    /// Runs one full submission attempt through `transport`.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::complete_submit`].
    pub async fn submit(
        &mut self,
        transport: &dyn SubmissionTransport,
    ) -> Result<SubmissionReceipt, IntakeError> {
        let payload = self.begin_submit()?;
        let outcome = transport.submit(&payload).await;
        self.complete_submit(outcome)
    }

    fn ensure_editable(&self) -> Result<(), IntakeError> {
        match self.state {
            SubmissionState::Editing => Ok(()),
            SubmissionState::InFlight => Err(IntakeError::SubmissionInFlight),
            SubmissionState::Completed => Err(IntakeError::AlreadySubmitted),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use civic_desk_intake_models::{Attachment, FieldValue};

    use super::*;

    /// In-memory transport that counts calls and can be told to fail.
    struct FakeTransport {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeTransport {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubmissionTransport for FakeTransport {
        async fn submit(
            &self,
            _payload: &SubmissionPayload,
        ) -> Result<SubmissionReceipt, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TransportError::Failed {
                    message: "connection refused".into(),
                })
            } else {
                Ok(SubmissionReceipt {
                    ticket: format!("GRV{}", uuid::Uuid::new_v4().simple()),
                    message: "registered".into(),
                })
            }
        }
    }

    fn photo() -> Attachment {
        Attachment::new("site.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn date(y: i32, m: u32, d: u32) -> FieldValue {
        FieldValue::Date(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    /// Fills a complaint session through step 3, leaving it on step 4.
    fn complaint_at_final_step() -> IntakeSession {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        s.set_field("title", FieldValue::Text("Pothole".into())).unwrap();
        s.set_field("description", FieldValue::Text("Deep pothole near the market".into()))
            .unwrap();
        s.set_field("category", FieldValue::Choice("Road Issues".into()))
            .unwrap();
        s.set_field("incidentDate", date(2024, 1, 10)).unwrap();
        s.advance().unwrap();

        s.set_field("address", FieldValue::Text("12 MG Road".into())).unwrap();
        s.set_field("ward", FieldValue::Choice("Ward 5".into())).unwrap();
        s.set_field("zone", FieldValue::Choice("Central Zone".into()))
            .unwrap();
        s.advance().unwrap();

        s.push_attachment("photos", photo()).unwrap();
        s.advance().unwrap();
        assert!(s.is_final_step());
        s
    }

    fn fill_complainant(s: &mut IntakeSession) {
        s.set_field("fullName", FieldValue::Text("A. Citizen".into())).unwrap();
        s.set_field("contactNumber", FieldValue::Text("9876543210".into()))
            .unwrap();
        s.set_field("idProofType", FieldValue::Choice("Aadhaar Card".into()))
            .unwrap();
        s.set_field("idProofNumber", FieldValue::Text("1234 5678 9012".into()))
            .unwrap();
    }

    #[test]
    fn starts_at_step_one() {
        let s = IntakeSession::for_kind(IntakeKind::Complaint);
        assert_eq!(s.step(), 1);
        assert_eq!(s.step_count(), 4);
        assert_eq!(s.state(), SubmissionState::Editing);
    }

    #[test]
    fn advance_blocked_until_required_fields_filled() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        let err = s.advance().unwrap_err();
        assert!(matches!(err, IntakeError::ValidationFailed { count: 4 }));
        assert_eq!(s.step(), 1);

        s.set_field("title", FieldValue::Text("Pothole".into())).unwrap();
        s.set_field("description", FieldValue::Text("Deep".into())).unwrap();
        s.set_field("category", FieldValue::Choice("Road Issues".into()))
            .unwrap();
        s.set_field("incidentDate", date(2024, 1, 10)).unwrap();
        assert_eq!(s.advance().unwrap(), 2);
    }

    #[test]
    fn field_update_clears_its_error_immediately() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        s.advance().unwrap_err();
        assert!(s.errors().contains_key("title"));

        s.set_field("title", FieldValue::Text("Pothole".into())).unwrap();
        assert!(!s.errors().contains_key("title"));
        // The other errors stay until the next validation pass.
        assert!(s.errors().contains_key("category"));
    }

    #[test]
    fn setting_an_empty_value_does_not_clear_the_error() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        s.advance().unwrap_err();
        s.set_field("title", FieldValue::Text("  ".into())).unwrap();
        assert!(s.errors().contains_key("title"));
    }

    #[test]
    fn back_navigation_is_unguarded_and_retains_values() {
        let mut s = complaint_at_final_step();
        assert_eq!(s.back(), 3);
        assert_eq!(s.back(), 2);
        assert_eq!(s.draft().text("title"), Some("Pothole"));
        // Forward again without re-entering anything.
        assert_eq!(s.advance().unwrap(), 3);
    }

    #[test]
    fn back_stays_on_step_one() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        assert_eq!(s.back(), 1);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        let err = s
            .set_field("notAField", FieldValue::Text("x".into()))
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnknownField { .. }));
    }

    #[test]
    fn submit_requires_the_final_step() {
        let mut s = IntakeSession::for_kind(IntakeKind::Complaint);
        assert!(matches!(
            s.begin_submit().unwrap_err(),
            IntakeError::NotAtFinalStep
        ));
    }

    #[test]
    fn missing_full_name_blocks_submission_with_one_error() {
        let mut s = complaint_at_final_step();
        fill_complainant(&mut s);
        s.set_field("fullName", FieldValue::Text(String::new())).unwrap();

        let err = s.begin_submit().unwrap_err();
        assert!(matches!(err, IntakeError::ValidationFailed { count: 1 }));
        assert_eq!(s.errors().len(), 1);
        assert!(s.errors().contains_key("fullName"));
        assert_eq!(s.state(), SubmissionState::Editing);
    }

    #[test]
    fn second_submit_while_pending_is_rejected_not_queued() {
        let mut s = complaint_at_final_step();
        fill_complainant(&mut s);

        let _payload = s.begin_submit().unwrap();
        assert_eq!(s.state(), SubmissionState::InFlight);
        assert!(matches!(
            s.begin_submit().unwrap_err(),
            IntakeError::SubmissionInFlight
        ));
        // Edits are also frozen while the attempt is pending.
        assert!(matches!(
            s.set_field("title", FieldValue::Text("x".into())).unwrap_err(),
            IntakeError::SubmissionInFlight
        ));
    }

    #[tokio::test]
    async fn successful_submit_makes_exactly_one_transport_call() {
        let transport = FakeTransport::new(false);
        let mut s = complaint_at_final_step();
        fill_complainant(&mut s);

        let receipt = s.submit(&transport).await.unwrap();
        assert!(receipt.ticket.starts_with("GRV"));
        assert_eq!(transport.calls(), 1);
        assert_eq!(s.state(), SubmissionState::Completed);

        // A repeat attempt after completion never reaches the wire.
        assert!(matches!(
            s.submit(&transport).await.unwrap_err(),
            IntakeError::AlreadySubmitted
        ));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn failed_submit_preserves_the_draft_for_retry() {
        let transport = FakeTransport::new(true);
        let mut s = complaint_at_final_step();
        fill_complainant(&mut s);

        let err = s.submit(&transport).await.unwrap_err();
        assert!(matches!(err, IntakeError::Transport(_)));
        assert!(s.is_final_step());
        assert_eq!(s.state(), SubmissionState::Editing);
        assert_eq!(s.draft().text("fullName"), Some("A. Citizen"));

        // Retry succeeds through a healthy transport.
        let transport = FakeTransport::new(false);
        assert!(s.submit(&transport).await.is_ok());
    }

    #[tokio::test]
    async fn single_step_intake_submits_from_step_one() {
        let transport = FakeTransport::new(false);
        let mut s = IntakeSession::for_kind(IntakeKind::PropertyVerification);
        assert!(s.is_final_step());

        s.set_field("fullName", FieldValue::Text("A. Owner".into())).unwrap();
        s.set_field("aadhaarNumber", FieldValue::Text("1234".into())).unwrap();
        s.set_field("contactNumber", FieldValue::Text("9876543210".into()))
            .unwrap();
        s.set_field("emailId", FieldValue::Text("owner@example.com".into()))
            .unwrap();
        s.set_field("permanentAddress", FieldValue::Text("12 MG Road".into()))
            .unwrap();
        s.set_field(
            "saleDeed",
            FieldValue::Attachment(Attachment::new("deed.pdf", "application/pdf", vec![1])),
        )
        .unwrap();
        s.set_field(
            "propertyTaxReceipt",
            FieldValue::Attachment(Attachment::new("tax.pdf", "application/pdf", vec![2])),
        )
        .unwrap();

        assert!(s.submit(&transport).await.is_ok());
        assert_eq!(transport.calls(), 1);
    }
}

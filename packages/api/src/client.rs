//! The backend client and its seam implementations.

use async_trait::async_trait;
use civic_desk_dashboard::{DashboardError, SnapshotSource};
use civic_desk_dashboard_models::DashboardData;
use civic_desk_intake::{
    SubmissionPayload, SubmissionReceipt, SubmissionTransport, TransportError,
};
use civic_desk_records::normalize_collection;
use civic_desk_records_models::{Priority, RecordKind, Status};
use serde::Deserialize;

use crate::{ApiError, Endpoints};

/// The raw, loosely-structured collections inside the dashboard
/// envelope, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDashboard {
    /// Raw complaint records.
    #[serde(default)]
    pub complaints: Vec<serde_json::Value>,
    /// Raw property verification records.
    #[serde(default)]
    pub property_verifications: Vec<serde_json::Value>,
    /// Raw building approval records.
    #[serde(default)]
    pub building_approvals: Vec<serde_json::Value>,
    /// Raw survey records.
    #[serde(default)]
    pub surveys: Vec<serde_json::Value>,
    /// Raw violation records.
    #[serde(default)]
    pub illegal_constructions: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: RawDashboard,
}

/// Fields accepted by the complaint status update endpoint.
#[derive(Debug, Clone)]
pub struct ComplaintStatusUpdate {
    /// New status.
    pub status: Status,
    /// Update message for the timeline.
    pub message: String,
    /// Acting officer.
    pub officer: String,
    /// Optional priority change.
    pub priority: Option<Priority>,
    /// Optional reassignment.
    pub assigned_to: Option<String>,
    /// Optional estimated resolution date.
    pub estimated_resolution: Option<String>,
}

/// Fields accepted by the property verification review endpoint.
#[derive(Debug, Clone)]
pub struct VerificationReview {
    /// New status.
    pub status: Status,
    /// Review notes.
    pub notes: Option<String>,
    /// Reviewing officer.
    pub verified_by: String,
}

/// Fields accepted by the building approval decision endpoint.
#[derive(Debug, Clone)]
pub struct ApprovalDecision {
    /// `true` approves, `false` rejects.
    pub approve: bool,
    /// Decision notes.
    pub notes: Option<String>,
    /// Deciding officer.
    pub approved_by: String,
    /// Reason, when rejecting.
    pub rejection_reason: Option<String>,
}

/// Fields accepted by the violation status update endpoint.
#[derive(Debug, Clone)]
pub struct ViolationStatusUpdate {
    /// New status.
    pub status: Status,
    /// Update message for the timeline.
    pub message: String,
    /// Acting officer.
    pub officer: String,
    /// Enforcement action taken.
    pub action_taken: String,
}

/// HTTP client for all backend contracts.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Creates a client against the given endpoints.
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Creates a client against the environment-configured backend.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Endpoints::from_env())
    }

    /// Delivers an encoded intake submission as a multipart request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on request failure and
    /// [`ApiError::Backend`] when the backend answers non-2xx or omits
    /// the promised identifier.
    pub async fn submit_intake(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        let url = self.endpoints.submission(payload.kind);

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &payload.text_fields {
            form = form.text(name.clone(), value.clone());
        }
        for (name, attachment) in &payload.attachments {
            let part = reqwest::multipart::Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)?;
            form = form.part(name.clone(), part);
        }

        log::debug!(
            "submitting {} intake: {} text field(s), {} attachment(s)",
            payload.kind,
            payload.text_fields.len(),
            payload.attachments.len()
        );

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        if !status.is_success() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        parse_receipt(&body).ok_or_else(|| ApiError::Backend {
            status: status.as_u16(),
            detail: "response did not include an identifier".to_owned(),
        })
    }

    /// Looks up one complaint by id, returning the raw record for
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id (404 is "not
    /// found", not a failure) and [`ApiError::Backend`] for other
    /// non-2xx answers.
    pub async fn track_complaint(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoints.track_complaint(id);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        let body: serde_json::Value = response.json().await?;
        if !status.is_success() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(body.get("complaint").cloned().unwrap_or(body))
    }

    /// Fetches the raw dashboard envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] when the envelope reports
    /// `success: false` or the response is non-2xx.
    pub async fn fetch_dashboard(&self) -> Result<RawDashboard, ApiError> {
        let url = self.endpoints.admin_dashboard();
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let envelope: DashboardEnvelope = response.json().await?;
        if !envelope.success {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: "dashboard fetch reported failure".to_owned(),
            });
        }
        Ok(envelope.data)
    }

    /// Updates a complaint's status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn update_complaint_status(
        &self,
        id: &str,
        update: &ComplaintStatusUpdate,
    ) -> Result<(), ApiError> {
        let mut fields = vec![
            ("status", update.status.to_string()),
            ("message", update.message.clone()),
            ("officer", update.officer.clone()),
        ];
        if let Some(priority) = update.priority {
            fields.push(("priority", priority.to_string()));
        }
        if let Some(assigned_to) = &update.assigned_to {
            fields.push(("assigned_to", assigned_to.clone()));
        }
        if let Some(estimated) = &update.estimated_resolution {
            fields.push(("estimated_resolution", estimated.clone()));
        }
        self.put_form(&self.endpoints.complaint_status(id), &fields)
            .await
    }

    /// Records a verification review decision.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn review_verification(
        &self,
        id: &str,
        review: &VerificationReview,
    ) -> Result<(), ApiError> {
        let mut fields = vec![
            ("status", review.status.to_string()),
            ("verified_by", review.verified_by.clone()),
        ];
        if let Some(notes) = &review.notes {
            fields.push(("notes", notes.clone()));
        }
        self.put_form(&self.endpoints.verification_review(id), &fields)
            .await
    }

    /// Records a building approval decision.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn decide_approval(
        &self,
        id: &str,
        decision: &ApprovalDecision,
    ) -> Result<(), ApiError> {
        let action = if decision.approve { "approve" } else { "reject" };
        let mut fields = vec![
            ("action", action.to_owned()),
            ("approved_by", decision.approved_by.clone()),
        ];
        if let Some(notes) = &decision.notes {
            fields.push(("notes", notes.clone()));
        }
        if let Some(reason) = &decision.rejection_reason {
            fields.push(("rejection_reason", reason.clone()));
        }
        self.put_form(&self.endpoints.approval_decision(id), &fields)
            .await
    }

    /// Updates a violation's status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id.
    pub async fn update_violation_status(
        &self,
        id: &str,
        update: &ViolationStatusUpdate,
    ) -> Result<(), ApiError> {
        let fields = vec![
            ("status", update.status.to_string()),
            ("message", update.message.clone()),
            ("officer", update.officer.clone()),
            ("action_taken", update.action_taken.clone()),
        ];
        self.put_form(&self.endpoints.violation_status(id), &fields)
            .await
    }

    async fn put_form(&self, url: &str, fields: &[(&str, String)]) -> Result<(), ApiError> {
        let response = self.http.put(url).form(fields).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(())
    }
}

/// Pulls the backend's `detail` message out of an error body.
fn error_detail(body: &serde_json::Value) -> String {
    body.get("detail")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("request failed")
        .to_owned()
}

/// Extracts the receipt from a successful submission response. The
/// identifier field varies by endpoint (`complaint_id`,
/// `ticket_number`, `survey_id`).
fn parse_receipt(body: &serde_json::Value) -> Option<SubmissionReceipt> {
    let ticket = ["complaint_id", "ticket_number", "survey_id"]
        .iter()
        .find_map(|field| body.get(field).and_then(serde_json::Value::as_str))?;
    let message = body
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    Some(SubmissionReceipt {
        ticket: ticket.to_owned(),
        message: message.to_owned(),
    })
}

#[async_trait]
impl SubmissionTransport for ApiClient {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, TransportError> {
        self.submit_intake(payload).await.map_err(|err| match err {
            ApiError::Backend { detail, .. } => TransportError::Rejected { detail },
            other => TransportError::Failed {
                message: other.to_string(),
            },
        })
    }
}

#[async_trait]
impl SnapshotSource for ApiClient {
    async fn fetch(&self) -> Result<DashboardData, DashboardError> {
        let raw = self
            .fetch_dashboard()
            .await
            .map_err(|err| DashboardError::Fetch {
                message: err.to_string(),
            })?;

        Ok(DashboardData {
            complaints: normalize_collection(RecordKind::Complaint, &raw.complaints),
            verifications: normalize_collection(
                RecordKind::PropertyVerification,
                &raw.property_verifications,
            ),
            approvals: normalize_collection(RecordKind::BuildingApproval, &raw.building_approvals),
            surveys: normalize_collection(RecordKind::Survey, &raw.surveys),
            violations: normalize_collection(RecordKind::Violation, &raw.illegal_constructions),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn receipt_parses_each_identifier_field() {
        let complaint = json!({ "success": true, "complaint_id": "GRV1", "message": "ok" });
        assert_eq!(parse_receipt(&complaint).unwrap().ticket, "GRV1");

        let verification = json!({ "success": true, "ticket_number": "PVT9" });
        let receipt = parse_receipt(&verification).unwrap();
        assert_eq!(receipt.ticket, "PVT9");
        assert_eq!(receipt.message, "");

        let survey = json!({ "success": true, "survey_id": "SUR3" });
        assert_eq!(parse_receipt(&survey).unwrap().ticket, "SUR3");
    }

    #[test]
    fn receipt_requires_an_identifier() {
        assert!(parse_receipt(&json!({ "success": true })).is_none());
    }

    #[test]
    fn error_detail_falls_back_when_absent() {
        assert_eq!(
            error_detail(&json!({ "detail": "Complaint not found" })),
            "Complaint not found"
        );
        assert_eq!(error_detail(&json!({})), "request failed");
    }

    #[test]
    fn dashboard_envelope_tolerates_missing_collections() {
        let envelope: DashboardEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": { "complaints": [{ "id": "GRV1" }] }
        }))
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.complaints.len(), 1);
        assert!(envelope.data.surveys.is_empty());
        assert!(envelope.data.illegal_constructions.is_empty());
    }
}

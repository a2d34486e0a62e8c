//! Submission encoding.
//!
//! Shapes a fully validated draft into the transport payload the
//! backend contract expects: named text fields paired with named binary
//! attachments. Pure data shaping — encoding itself cannot fail; only
//! the subsequent transport call can.

use civic_desk_intake_models::{
    Attachment, DraftRecord, FieldKind, FieldValue, IntakeKind, IntakeSchema,
};

/// An encoded submission, ready for delivery.
///
/// Text fields appear under their snake_case wire names; optional
/// fields absent from the draft are encoded as empty strings, never
/// omitted, so the receiving contract sees a stable field set.
/// Multi-upload slots repeat their wire name once per attachment so the
/// receiver can group them.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    /// Which endpoint family this payload targets.
    pub kind: IntakeKind,
    /// `(wire_name, value)` pairs in schema order.
    pub text_fields: Vec<(String, String)>,
    /// `(wire_name, attachment)` pairs in schema order.
    pub attachments: Vec<(String, Attachment)>,
}

/// Encodes a draft against its schema.
///
/// Deterministic for a given draft: fields are emitted in schema order
/// and values render the same way every time. Survey drafts pack their
/// site fields into the single `survey_data` JSON document the survey
/// endpoint accepts, alongside the optional drone capture file.
#[must_use]
pub fn encode(schema: &IntakeSchema, draft: &DraftRecord) -> SubmissionPayload {
    if schema.kind == IntakeKind::Survey {
        return encode_survey(schema, draft);
    }

    let mut text_fields = Vec::new();
    let mut attachments = Vec::new();

    for field in schema.fields() {
        match field.kind {
            FieldKind::Attachment => {
                if let Some(FieldValue::Attachment(a)) = draft.get(field.key) {
                    attachments.push((field.wire.to_owned(), a.clone()));
                }
            }
            FieldKind::AttachmentList => {
                for a in draft.attachments(field.key) {
                    attachments.push((field.wire.to_owned(), a.clone()));
                }
            }
            _ => {
                let rendered = draft.get(field.key).map(render_text).unwrap_or_default();
                text_fields.push((field.wire.to_owned(), rendered));
            }
        }
    }

    SubmissionPayload {
        kind: schema.kind,
        text_fields,
        attachments,
    }
}

/// Renders a non-binary field value as its wire string.
fn render_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) | FieldValue::Choice(s) => s.clone(),
        FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        FieldValue::Number(n) => render_number(*n),
        FieldValue::Flag(b) => b.to_string(),
        FieldValue::Coordinates {
            latitude,
            longitude,
        } => format!("{latitude},{longitude}"),
        FieldValue::Attachment(_) | FieldValue::Attachments(_) => String::new(),
    }
}

/// Renders integral numbers without a trailing `.0`.
fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Builds the survey payload: one `survey_data` JSON text field plus
/// the optional drone data file.
fn encode_survey(schema: &IntakeSchema, draft: &DraftRecord) -> SubmissionPayload {
    let mut data = serde_json::Map::new();

    data.insert("ward_no".to_owned(), number_value(draft, "wardNo"));
    data.insert(
        "survey_date".to_owned(),
        text_value(schema, draft, "surveyDate"),
    );
    data.insert("drone_id".to_owned(), text_value(schema, draft, "droneId"));
    data.insert(
        "locality_name".to_owned(),
        text_value(schema, draft, "localityName"),
    );
    data.insert(
        "area_name".to_owned(),
        text_value(schema, draft, "areaName"),
    );
    data.insert(
        "coordinates".to_owned(),
        coordinates_value(draft, "coordinates"),
    );

    // Measurements arrive as a JSON document (roads, buildings, land
    // usage). Merge its top-level keys; anything unparseable is kept
    // verbatim so no input is lost.
    if let Some(raw) = draft.text("surveyPayload").filter(|s| !s.trim().is_empty()) {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(payload)) => data.extend(payload),
            _ => {
                data.insert(
                    "raw_payload".to_owned(),
                    serde_json::Value::String(raw.to_owned()),
                );
            }
        }
    }

    let mut attachments = Vec::new();
    if let Some(FieldValue::Attachment(a)) = draft.get("droneDataFile") {
        attachments.push(("drone_data_file".to_owned(), a.clone()));
    }

    let json = serde_json::Value::Object(data).to_string();

    SubmissionPayload {
        kind: IntakeKind::Survey,
        text_fields: vec![("survey_data".to_owned(), json)],
        attachments,
    }
}

fn text_value(schema: &IntakeSchema, draft: &DraftRecord, key: &str) -> serde_json::Value {
    let rendered = draft.get(key).map(render_text).unwrap_or_default();
    // Schema lookup keeps unknown keys from silently mapping to "".
    debug_assert!(schema.field(key).is_some(), "unknown survey field {key}");
    serde_json::Value::String(rendered)
}

fn number_value(draft: &DraftRecord, key: &str) -> serde_json::Value {
    match draft.get(key) {
        Some(FieldValue::Number(n)) => serde_json::Number::from_f64(*n)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Some(other) => serde_json::Value::String(render_text(other)),
        None => serde_json::Value::Null,
    }
}

fn coordinates_value(draft: &DraftRecord, key: &str) -> serde_json::Value {
    match draft.get(key) {
        Some(FieldValue::Coordinates {
            latitude,
            longitude,
        }) => serde_json::json!({ "latitude": latitude, "longitude": longitude }),
        _ => serde_json::Value::Null,
    }
}

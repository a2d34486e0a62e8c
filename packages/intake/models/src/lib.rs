#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Draft record value model and per-kind intake schemas.
//!
//! A [`DraftRecord`] is the in-progress, not-yet-submitted state of one
//! intake form: a mapping from field key to [`FieldValue`]. The shape of
//! each form — which fields exist, which step renders them, which are
//! required — is captured by an [`IntakeSchema`], one per [`IntakeKind`].

pub mod schema;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use schema::{FieldDef, FieldKind, IntakeSchema, StepDef};

/// The four citizen-facing request kinds accepted by the intake workflow.
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
pub enum IntakeKind {
    /// Citizen grievance (pothole, garbage, noise, ...).
    Complaint,
    /// Document check for an existing property.
    PropertyVerification,
    /// Permission to construct or extend a building.
    BuildingApproval,
    /// Ward field survey, optionally backed by drone capture data.
    Survey,
}

impl IntakeKind {
    /// Returns all intake kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complaint,
            Self::PropertyVerification,
            Self::BuildingApproval,
            Self::Survey,
        ]
    }
}

/// One uploaded binary: the original filename, its MIME type, and the
/// raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename as provided by the citizen.
    pub file_name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from its parts.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// A single field's value inside a [`DraftRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text (also used for phone numbers, IDs, addresses).
    Text(String),
    /// One option from an enumerated list; empty string means unselected.
    Choice(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A numeric value (ward numbers, areas).
    Number(f64),
    /// A yes/no flag.
    Flag(bool),
    /// A single-upload slot holding one binary.
    Attachment(Attachment),
    /// A multi-upload slot holding an insertion-ordered sequence.
    Attachments(Vec<Attachment>),
    /// A captured geo-coordinate pair.
    Coordinates {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
}

impl FieldValue {
    /// Returns `true` when this value counts as "not provided" for
    /// required-field validation: whitespace-only text, an unselected
    /// choice, or a zero-length attachment list. Dates, numbers, flags,
    /// coordinates, and single attachments are never empty once set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Choice(s) => s.trim().is_empty(),
            Self::Attachments(list) => list.is_empty(),
            Self::Date(_)
            | Self::Number(_)
            | Self::Flag(_)
            | Self::Attachment(_)
            | Self::Coordinates { .. } => false,
        }
    }

    /// Returns the text content for text-like values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

static NO_ATTACHMENTS: &[Attachment] = &[];

/// The in-progress state of one intake form.
///
/// Owned exclusively by the active intake session; mutable only through
/// the named field-update operations below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    values: BTreeMap<String, FieldValue>,
}

impl DraftRecord {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if any has been set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.values.insert(key.into(), value);
    }

    /// Removes the value for `key`, returning it if present.
    pub fn clear(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    /// Returns `true` when `key` is absent or holds an empty value.
    #[must_use]
    pub fn is_empty_field(&self, key: &str) -> bool {
        self.values.get(key).is_none_or(FieldValue::is_empty)
    }

    /// Returns the text content of `key` for text-like values.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(FieldValue::as_text)
    }

    /// Appends one binary to the multi-upload slot `key`, creating the
    /// slot if absent. A non-list value already stored under `key` is
    /// replaced by a one-element list.
    pub fn push_attachment(&mut self, key: impl Into<String>, attachment: Attachment) {
        let key = key.into();
        match self.values.get_mut(&key) {
            Some(FieldValue::Attachments(list)) => list.push(attachment),
            _ => {
                self.values
                    .insert(key, FieldValue::Attachments(vec![attachment]));
            }
        }
    }

    /// Removes the attachment at `index` from the multi-upload slot
    /// `key`. Returns `None` when the slot or index does not exist.
    pub fn remove_attachment(&mut self, key: &str, index: usize) -> Option<Attachment> {
        match self.values.get_mut(key) {
            Some(FieldValue::Attachments(list)) if index < list.len() => Some(list.remove(index)),
            _ => None,
        }
    }

    /// Returns the list stored in the multi-upload slot `key`, or an
    /// empty slice. Single-upload slots are read via [`Self::get`].
    #[must_use]
    pub fn attachments(&self, key: &str) -> &[Attachment] {
        match self.values.get(key) {
            Some(FieldValue::Attachments(list)) => list,
            _ => NO_ATTACHMENTS,
        }
    }

    /// Iterates over all `(key, value)` pairs currently set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str) -> Attachment {
        Attachment::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    #[test]
    fn whitespace_text_is_empty() {
        assert!(FieldValue::Text("   ".into()).is_empty());
        assert!(FieldValue::Choice(String::new()).is_empty());
        assert!(!FieldValue::Text("Pothole".into()).is_empty());
    }

    #[test]
    fn empty_attachment_list_is_empty() {
        assert!(FieldValue::Attachments(vec![]).is_empty());
        assert!(!FieldValue::Attachments(vec![jpeg("a.jpg")]).is_empty());
        assert!(!FieldValue::Attachment(jpeg("a.jpg")).is_empty());
    }

    #[test]
    fn missing_field_is_empty() {
        let draft = DraftRecord::new();
        assert!(draft.is_empty_field("title"));
    }

    #[test]
    fn push_and_remove_attachments_keep_order() {
        let mut draft = DraftRecord::new();
        draft.push_attachment("photos", jpeg("one.jpg"));
        draft.push_attachment("photos", jpeg("two.jpg"));
        draft.push_attachment("photos", jpeg("three.jpg"));

        assert_eq!(draft.attachments("photos").len(), 3);

        let removed = draft.remove_attachment("photos", 1).unwrap();
        assert_eq!(removed.file_name, "two.jpg");

        let names: Vec<&str> = draft
            .attachments("photos")
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(names, ["one.jpg", "three.jpg"]);
    }

    #[test]
    fn remove_from_missing_slot_is_none() {
        let mut draft = DraftRecord::new();
        assert!(draft.remove_attachment("photos", 0).is_none());
    }

    #[test]
    fn set_replaces_value() {
        let mut draft = DraftRecord::new();
        draft.set("title", FieldValue::Text("Old".into()));
        draft.set("title", FieldValue::Text("New".into()));
        assert_eq!(draft.text("title"), Some("New"));
    }
}

//! Per-step required-field validation.
//!
//! Pure predicate over a draft and one step definition: the returned
//! error map contains exactly the required-but-empty fields of that
//! step, keyed by form field key. An empty map means the step is
//! advanceable.

use std::collections::BTreeMap;

use civic_desk_intake_models::{DraftRecord, StepDef};

/// Field key to inline validation message.
///
/// Fully replaced on each validation pass, never merged.
pub type ErrorMap = BTreeMap<String, String>;

/// Validates one step of a draft.
///
/// "Empty" means: key absent, whitespace-only text, unselected choice,
/// or a zero-length attachment list. Every key in the result is a field
/// rendered on `step` — no orphan errors.
#[must_use]
pub fn validate_step(draft: &DraftRecord, step: &StepDef) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in step.required_fields() {
        if draft.is_empty_field(field.key) {
            errors.insert(field.key.to_owned(), field.requirement.to_owned());
        }
    }
    errors
}

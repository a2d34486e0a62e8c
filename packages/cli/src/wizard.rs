//! Interactive intake wizard.
//!
//! Walks one [`IntakeSession`] step by step: prompts every field the
//! step renders, asks the session to advance, and re-prompts when
//! validation blocks. The terminal step submits through the backend
//! client; a transport failure offers a retry without losing input.

use std::path::Path;

use civic_desk_api::ApiClient;
use civic_desk_intake::{IntakeError, IntakeSession};
use civic_desk_intake_models::{Attachment, FieldDef, FieldKind, FieldValue, IntakeKind};
use civic_desk_reference::ReferenceData;
use console::style;
use dialoguer::{Confirm, Input, Select};

/// Runs the full wizard for one intake kind.
pub async fn run(
    kind: IntakeKind,
    client: &ApiClient,
    reference: &dyn ReferenceData,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = IntakeSession::for_kind(kind);

    loop {
        let Some(step) = session.schema().step(session.step()) else {
            break;
        };
        println!();
        println!(
            "{} {}",
            style(format!("[{}/{}]", session.step(), session.step_count())).dim(),
            style(step.title).bold()
        );

        let fields: Vec<FieldDef> = step.fields.clone();
        for field in &fields {
            prompt_field(&mut session, field, reference)?;
        }

        if session.is_final_step() {
            match session.submit(client).await {
                Ok(receipt) => {
                    println!();
                    println!(
                        "{} Ticket: {}",
                        style("Submitted successfully.").green().bold(),
                        style(&receipt.ticket).bold()
                    );
                    if !receipt.message.is_empty() {
                        println!("{}", receipt.message);
                    }
                    return Ok(());
                }
                Err(IntakeError::ValidationFailed { .. }) => {
                    print_errors(&session);
                }
                Err(IntakeError::Transport(err)) => {
                    println!("{} {err}", style("Submission failed:").red());
                    let retry = Confirm::new()
                        .with_prompt("Retry submission?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        return Err(err.into());
                    }
                    // The session kept the draft; only the final step
                    // re-runs.
                }
                Err(other) => return Err(other.into()),
            }
        } else {
            match session.advance() {
                Ok(_) => {}
                Err(IntakeError::ValidationFailed { .. }) => print_errors(&session),
                Err(other) => return Err(other.into()),
            }
        }
    }

    Ok(())
}

fn print_errors(session: &IntakeSession) {
    for (key, message) in session.errors() {
        let label = session
            .schema()
            .field(key)
            .map_or(key.as_str(), |f| f.label);
        println!("  {} {message}", style(format!("{label}:")).red());
    }
}

/// Prompts for one field and stores a non-empty answer in the session.
fn prompt_field(
    session: &mut IntakeSession,
    field: &FieldDef,
    reference: &dyn ReferenceData,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = match field.kind {
        FieldKind::Choice => prompt_choice(session.schema().kind, field, reference)?,
        FieldKind::Text => prompt_text(field)?,
        FieldKind::Date => prompt_date(field)?,
        FieldKind::Number => prompt_number(field)?,
        FieldKind::Flag => Some(FieldValue::Flag(
            Confirm::new()
                .with_prompt(field.label)
                .default(false)
                .interact()?,
        )),
        FieldKind::Coordinates => prompt_coordinates(field)?,
        FieldKind::Attachment => prompt_attachment(field)?.map(FieldValue::Attachment),
        FieldKind::AttachmentList => {
            prompt_attachment_list(session, field)?;
            None
        }
    };

    if let Some(value) = value {
        session.set_field(field.key, value)?;
    }
    Ok(())
}

fn optional_suffix(field: &FieldDef) -> &'static str {
    if field.required { "" } else { " (optional, enter to skip)" }
}

fn prompt_text(field: &FieldDef) -> Result<Option<FieldValue>, Box<dyn std::error::Error>> {
    let answer: String = Input::new()
        .with_prompt(format!("{}{}", field.label, optional_suffix(field)))
        .allow_empty(true)
        .interact_text()?;
    Ok((!answer.trim().is_empty()).then(|| FieldValue::Text(answer)))
}

fn prompt_choice(
    kind: IntakeKind,
    field: &FieldDef,
    reference: &dyn ReferenceData,
) -> Result<Option<FieldValue>, Box<dyn std::error::Error>> {
    let Some(options) = choice_options(kind, field.key, reference) else {
        return prompt_text(field);
    };

    let idx = Select::new()
        .with_prompt(field.label)
        .items(&options)
        .default(0)
        .interact()?;
    Ok(options
        .get(idx)
        .map(|choice| FieldValue::Choice(choice.clone())))
}

/// Maps a choice field to its reference dataset.
fn choice_options(
    kind: IntakeKind,
    key: &str,
    reference: &dyn ReferenceData,
) -> Option<Vec<String>> {
    let options: Vec<String> = match key {
        "category" => reference.complaint_categories().to_vec(),
        "ward" => reference.wards().to_vec(),
        "zone" => reference.zones().to_vec(),
        "idProofType" => reference.id_proof_types().to_vec(),
        "propertyType" => reference.property_types().to_vec(),
        "buildingPurpose" => reference.building_purposes().to_vec(),
        "gender" => ["Male", "Female", "Other", "Prefer not to say"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        _ => {
            log::debug!("no reference options for {kind} field {key}");
            return None;
        }
    };
    Some(options)
}

fn prompt_date(field: &FieldDef) -> Result<Option<FieldValue>, Box<dyn std::error::Error>> {
    loop {
        let answer: String = Input::new()
            .with_prompt(format!(
                "{} (YYYY-MM-DD){}",
                field.label,
                optional_suffix(field)
            ))
            .allow_empty(true)
            .interact_text()?;
        if answer.trim().is_empty() {
            return Ok(None);
        }
        match chrono::NaiveDate::parse_from_str(answer.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(Some(FieldValue::Date(date))),
            Err(_) => println!("  {}", style("Not a valid date, expected YYYY-MM-DD").red()),
        }
    }
}

fn prompt_number(field: &FieldDef) -> Result<Option<FieldValue>, Box<dyn std::error::Error>> {
    loop {
        let answer: String = Input::new()
            .with_prompt(format!("{}{}", field.label, optional_suffix(field)))
            .allow_empty(true)
            .interact_text()?;
        if answer.trim().is_empty() {
            return Ok(None);
        }
        match answer.trim().parse::<f64>() {
            Ok(n) => return Ok(Some(FieldValue::Number(n))),
            Err(_) => println!("  {}", style("Not a number").red()),
        }
    }
}

fn prompt_coordinates(
    field: &FieldDef,
) -> Result<Option<FieldValue>, Box<dyn std::error::Error>> {
    let lat: String = Input::new()
        .with_prompt(format!("{} latitude{}", field.label, optional_suffix(field)))
        .allow_empty(true)
        .interact_text()?;
    if lat.trim().is_empty() {
        return Ok(None);
    }
    let lng: String = Input::new()
        .with_prompt(format!("{} longitude", field.label))
        .allow_empty(true)
        .interact_text()?;

    match (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
        (Ok(latitude), Ok(longitude)) => Ok(Some(FieldValue::Coordinates {
            latitude,
            longitude,
        })),
        _ => {
            println!("  {}", style("Coordinates must be decimal degrees").red());
            Ok(None)
        }
    }
}

fn prompt_attachment(
    field: &FieldDef,
) -> Result<Option<Attachment>, Box<dyn std::error::Error>> {
    loop {
        let path: String = Input::new()
            .with_prompt(format!(
                "{} file path{}",
                field.label,
                optional_suffix(field)
            ))
            .allow_empty(true)
            .interact_text()?;
        if path.trim().is_empty() {
            return Ok(None);
        }
        match read_attachment(path.trim()) {
            Ok(attachment) => return Ok(Some(attachment)),
            Err(err) => println!("  {}", style(format!("Cannot read file: {err}")).red()),
        }
    }
}

fn prompt_attachment_list(
    session: &mut IntakeSession,
    field: &FieldDef,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} — add file paths one per line, empty line to finish",
        field.label
    );
    loop {
        let path: String = Input::new()
            .with_prompt(format!("  {} file", field.label))
            .allow_empty(true)
            .interact_text()?;
        if path.trim().is_empty() {
            return Ok(());
        }
        match read_attachment(path.trim()) {
            Ok(attachment) => session.push_attachment(field.key, attachment)?,
            Err(err) => println!("  {}", style(format!("Cannot read file: {err}")).red()),
        }
    }
}

fn read_attachment(path: &str) -> std::io::Result<Attachment> {
    let bytes = std::fs::read(path)?;
    let file_name = Path::new(path)
        .file_name()
        .map_or_else(|| path.to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(Attachment::new(file_name, content_type_for(path), bytes))
}

/// Guesses a MIME type from the file extension.
fn content_type_for(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_follow_extensions() {
        assert_eq!(content_type_for("site.JPG"), "image/jpeg");
        assert_eq!(content_type_for("deed.pdf"), "application/pdf");
        assert_eq!(content_type_for("capture.json"), "application/json");
        assert_eq!(content_type_for("mystery"), "application/octet-stream");
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the civic service desk.
//!
//! Citizen-facing commands walk the multi-step intake workflow with
//! `dialoguer` prompts; admin-facing commands fetch the dashboard
//! envelope and render the aggregate snapshot.

mod render;
mod wizard;

use civic_desk_api::{ApiClient, ApiError};
use civic_desk_intake_models::IntakeKind;
use civic_desk_records::normalize;
use civic_desk_records_models::{RecordKind, Status};
use civic_desk_reference::StaticReference;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "civic_desk", about = "Civic service desk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a complaint (4-step wizard)
    Complaint,
    /// Submit property documents for verification
    VerifyProperty,
    /// Apply for building approval
    BuildingApproval,
    /// Record a ward field survey
    Survey,
    /// Track a complaint by its id
    Track {
        /// Complaint id (e.g. `GRV1A2B3C`)
        id: String,
    },
    /// Fetch and render the admin dashboard
    Dashboard,
    /// Update a complaint's status (admin)
    UpdateStatus {
        /// Complaint id
        id: String,
        /// New status (e.g. "In Progress", "Resolved")
        #[arg(long)]
        status: String,
        /// Timeline message
        #[arg(long)]
        message: String,
        /// Acting officer
        #[arg(long)]
        officer: String,
        /// New priority (High/Medium/Low)
        #[arg(long)]
        priority: Option<String>,
        /// Reassign to this officer
        #[arg(long)]
        assign: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let client = ApiClient::from_env();
    let reference = StaticReference::new();

    match cli.command {
        Commands::Complaint => wizard::run(IntakeKind::Complaint, &client, &reference).await?,
        Commands::VerifyProperty => {
            wizard::run(IntakeKind::PropertyVerification, &client, &reference).await?;
        }
        Commands::BuildingApproval => {
            wizard::run(IntakeKind::BuildingApproval, &client, &reference).await?;
        }
        Commands::Survey => wizard::run(IntakeKind::Survey, &client, &reference).await?,
        Commands::Track { id } => track(&client, &id).await?,
        Commands::Dashboard => dashboard(&client).await?,
        Commands::UpdateStatus {
            id,
            status,
            message,
            officer,
            priority,
            assign,
        } => update_status(&client, &id, &status, message, officer, priority, assign).await?,
    }

    Ok(())
}

/// Pushes a status update to one complaint.
async fn update_status(
    client: &ApiClient,
    id: &str,
    status: &str,
    message: String,
    officer: String,
    priority: Option<String>,
    assign: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = Status::parse_for_kind(status, RecordKind::Complaint);
    let priority = priority.and_then(|p| p.parse().ok());

    let update = civic_desk_api::ComplaintStatusUpdate {
        status,
        message,
        officer,
        priority,
        assigned_to: assign,
        estimated_resolution: None,
    };

    match client.update_complaint_status(id, &update).await {
        Ok(()) => {
            println!("Complaint {id} updated to {status}.");
            Ok(())
        }
        Err(ApiError::NotFound) => {
            println!("Complaint not found. Please check the ID and try again.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Looks up one complaint and renders its status timeline.
async fn track(client: &ApiClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match client.track_complaint(id).await {
        Ok(raw) => {
            let record = normalize(RecordKind::Complaint, &raw);
            render::render_tracked(&record);
            Ok(())
        }
        Err(ApiError::NotFound) => {
            // A valid-but-unknown id is a user-facing state, not a failure.
            println!("Complaint not found. Please check the ID and try again.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Fetches the full dashboard dataset and renders the snapshot.
async fn dashboard(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = civic_desk_dashboard::DashboardSession::new();
    session.refresh(client).await?;
    if let (Some(snapshot), Some(data)) = (session.snapshot(), session.data()) {
        render::render_dashboard(snapshot, data);
    }
    Ok(())
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Operational aggregation for the admin dashboard.
//!
//! Derives dashboard-ready statistics (counts, rankings, time deltas,
//! compliance) from collections of normalized records. Each derivation
//! declares its own fallback for missing inputs — no derivation ever
//! fails because an upstream record was incomplete. Fetching happens
//! behind the [`SnapshotSource`] trait; the [`refresh::DashboardSession`]
//! replaces its whole snapshot atomically per refresh.

pub mod presenter;
pub mod refresh;
pub mod stats;

use async_trait::async_trait;
use civic_desk_dashboard_models::DashboardData;
use thiserror::Error;

pub use refresh::DashboardSession;
pub use stats::snapshot;

/// Errors surfaced by dashboard operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The backend fetch failed; the previous snapshot stays on screen
    /// and the refresh is safely retryable.
    #[error("dashboard fetch failed: {message}")]
    Fetch {
        /// Description of what went wrong.
        message: String,
    },

    /// A refresh is already in flight; a second one is rejected, never
    /// queued.
    #[error("a refresh is already in flight")]
    RefreshInFlight,

    /// The result belonged to an abandoned refresh and was discarded
    /// rather than applied to stale state.
    #[error("stale refresh result discarded")]
    Stale,
}

/// Fetches the five normalized record collections for one refresh.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches and normalizes the full dashboard dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Fetch`] when the backend call fails.
    async fn fetch(&self) -> Result<DashboardData, DashboardError>;
}

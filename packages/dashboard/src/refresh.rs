//! Dashboard refresh session.
//!
//! One [`DashboardSession`] owns the current snapshot for one admin
//! view. A refresh re-fetches the entire dataset and atomically
//! replaces all derived state — partial replacement is disallowed so
//! the view never mixes old and new aggregates. Results from abandoned
//! refreshes are discarded rather than applied to stale state.

use civic_desk_dashboard_models::{AggregateSnapshot, DashboardData};

use crate::stats::snapshot;
use crate::{DashboardError, SnapshotSource};

/// Token tying one in-flight refresh to the session state it started
/// from.
#[derive(Debug)]
pub struct RefreshTicket {
    epoch: u64,
}

/// Exclusively-owned dashboard state for one admin session.
#[derive(Debug, Default)]
pub struct DashboardSession {
    epoch: u64,
    loading: bool,
    data: Option<DashboardData>,
    snapshot: Option<AggregateSnapshot>,
}

impl DashboardSession {
    /// Creates an empty session with nothing fetched yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if a refresh has completed.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&AggregateSnapshot> {
        self.snapshot.as_ref()
    }

    /// The normalized collections backing the snapshot.
    #[must_use]
    pub const fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Returns `true` while a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a refresh, freezing the session until it resolves.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::RefreshInFlight`] when one is already
    /// pending; the second refresh is rejected, never queued.
    pub fn begin_refresh(&mut self) -> Result<RefreshTicket, DashboardError> {
        if self.loading {
            return Err(DashboardError::RefreshInFlight);
        }
        self.loading = true;
        self.epoch += 1;
        Ok(RefreshTicket { epoch: self.epoch })
    }

    /// Abandons the in-flight refresh, e.g. when the view navigates
    /// away. A result arriving later with the old ticket is discarded.
    pub fn cancel_refresh(&mut self) {
        if self.loading {
            self.loading = false;
            self.epoch += 1;
        }
    }

    /// Resolves the refresh started by [`Self::begin_refresh`].
    ///
    /// On success the snapshot and its backing data are replaced
    /// together; on fetch failure the previous snapshot is retained
    /// untouched and the error passes through for a retry.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Stale`] for tickets from an abandoned
    /// refresh (the result is dropped), or the fetch error itself.
    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        outcome: Result<DashboardData, DashboardError>,
    ) -> Result<&AggregateSnapshot, DashboardError> {
        if ticket.epoch != self.epoch {
            log::debug!("discarding refresh result from abandoned epoch {}", ticket.epoch);
            return Err(DashboardError::Stale);
        }
        self.loading = false;
        let data = outcome?;
        let computed = snapshot(&data);
        self.data = Some(data);
        Ok(self.snapshot.insert(computed))
    }

    /// Runs one full refresh through `source`.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_refresh`] and [`Self::complete_refresh`].
    pub async fn refresh(
        &mut self,
        source: &dyn SnapshotSource,
    ) -> Result<&AggregateSnapshot, DashboardError> {
        let ticket = self.begin_refresh()?;
        let outcome = source.fetch().await;
        self.complete_refresh(&ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use civic_desk_records_models::RecordKind;

    use super::*;

    struct FakeSource {
        complaints: usize,
        fail: bool,
    }

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn fetch(&self) -> Result<DashboardData, DashboardError> {
            if self.fail {
                return Err(DashboardError::Fetch {
                    message: "connection reset".into(),
                });
            }
            let raw: Vec<serde_json::Value> = (0..self.complaints)
                .map(|i| serde_json::json!({ "id": format!("GRV{i}"), "status": "New" }))
                .collect();
            Ok(DashboardData {
                complaints: civic_desk_records::normalize_collection(RecordKind::Complaint, &raw),
                ..DashboardData::default()
            })
        }
    }

    #[tokio::test]
    async fn refresh_replaces_the_whole_snapshot() {
        let mut session = DashboardSession::new();
        assert!(session.snapshot().is_none());

        session
            .refresh(&FakeSource {
                complaints: 3,
                fail: false,
            })
            .await
            .unwrap();
        assert_eq!(session.snapshot().unwrap().complaints.total, 3);

        session
            .refresh(&FakeSource {
                complaints: 1,
                fail: false,
            })
            .await
            .unwrap();
        assert_eq!(session.snapshot().unwrap().complaints.total, 1);
        assert_eq!(session.data().unwrap().complaints.len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_retains_the_previous_snapshot() {
        let mut session = DashboardSession::new();
        session
            .refresh(&FakeSource {
                complaints: 2,
                fail: false,
            })
            .await
            .unwrap();

        let err = session
            .refresh(&FakeSource {
                complaints: 9,
                fail: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { .. }));
        assert_eq!(session.snapshot().unwrap().complaints.total, 2);
        assert!(!session.is_loading());
    }

    #[test]
    fn second_refresh_while_pending_is_rejected() {
        let mut session = DashboardSession::new();
        let _ticket = session.begin_refresh().unwrap();
        assert!(session.is_loading());
        assert!(matches!(
            session.begin_refresh().unwrap_err(),
            DashboardError::RefreshInFlight
        ));
    }

    #[test]
    fn abandoned_refresh_results_are_discarded() {
        let mut session = DashboardSession::new();
        let stale_ticket = session.begin_refresh().unwrap();
        session.cancel_refresh();

        let fresh_ticket = session.begin_refresh().unwrap();
        let outcome = session.complete_refresh(&stale_ticket, Ok(DashboardData::default()));
        assert!(matches!(outcome, Err(DashboardError::Stale)));
        // The stale result must not have been applied.
        assert!(session.snapshot().is_none());
        assert!(session.is_loading());

        session
            .complete_refresh(&fresh_ticket, Ok(DashboardData::default()))
            .unwrap();
        assert!(session.snapshot().is_some());
    }
}

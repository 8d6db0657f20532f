//! Dashboard state and its reconciliation with the repository.
//!
//! The controller keeps an in-memory view of the complaint list. Status
//! changes are applied to the view first and persisted afterwards; when
//! persistence does not confirm the change, the view is restored to the
//! exact snapshot taken before it.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::{info_span, Instrument};

use super::board::Board;
use super::detail::{DetailPanel, SummaryState};
use super::events::{DashboardBroadcaster, DashboardEventKind};
use crate::complaint::{Clock, Complaint, ComplaintStatus};
use crate::error::StorageError;
use crate::repository::ComplaintRepository;
use crate::summary::SummaryGenerator;

/// Shown instead of the board when listing fails.
pub const FETCH_FAILED: &str = "Failed to fetch complaints.";

/// One-shot notice raised when a status change is rolled back.
pub const UPDATE_FAILED: &str = "Failed to update status.";

/// Complaint operations the dashboard relies on.
#[async_trait]
pub trait ComplaintBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Complaint>, StorageError>;

    async fn update_status(
        &self,
        id: &str,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, StorageError>;
}

#[async_trait]
impl ComplaintBackend for ComplaintRepository {
    async fn list(&self) -> Result<Vec<Complaint>, StorageError> {
        ComplaintRepository::list(self).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: ComplaintStatus,
    ) -> Result<Option<Complaint>, StorageError> {
        ComplaintRepository::update_status(self, id, status).await
    }
}

/// Loading state of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed { message: String },
}

/// What the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Failed { message: String },
    Ready(Board),
}

/// Result of [`DashboardController::apply_status_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// Persisted. The view keeps its optimistic state.
    Confirmed(Complaint),
    /// Not persisted. The view was restored and a notice raised.
    Reverted,
}

#[derive(Debug)]
struct DashboardState {
    phase: LoadPhase,
    complaints: Vec<Complaint>,
    notice: Option<String>,
    detail: Option<DetailPanel>,
}

/// Owns the dashboard view.
pub struct DashboardController {
    backend: Arc<dyn ComplaintBackend>,
    clock: Arc<dyn Clock>,
    state: RwLock<DashboardState>,
    events: DashboardBroadcaster,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn ComplaintBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            state: RwLock::new(DashboardState {
                phase: LoadPhase::Loading,
                complaints: Vec::new(),
                notice: None,
                detail: None,
            }),
            events: DashboardBroadcaster::default(),
        }
    }

    pub fn with_broadcaster(mut self, events: DashboardBroadcaster) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &DashboardBroadcaster {
        &self.events
    }

    fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Dashboard state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Dashboard state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Reloads the whole view from the backend.
    ///
    /// On failure the view is left as it was but the phase becomes
    /// [`LoadPhase::Failed`], which hides the board.
    pub async fn refresh(&self) -> LoadPhase {
        self.write().phase = LoadPhase::Loading;

        let result = self
            .backend
            .list()
            .instrument(info_span!("dashboard.refresh"))
            .await;

        match result {
            Ok(complaints) => {
                let count = complaints.len();
                {
                    let mut state = self.write();
                    state.complaints = complaints;
                    state.phase = LoadPhase::Ready;
                }
                log::debug!("Dashboard refreshed with {} complaints", count);
                self.events.send(DashboardEventKind::Refreshed { count });
                LoadPhase::Ready
            }
            Err(e) => {
                log::error!("Failed to fetch complaints: {}", e);
                let phase = LoadPhase::Failed {
                    message: FETCH_FAILED.to_string(),
                };
                self.write().phase = phase.clone();
                self.events.send(DashboardEventKind::LoadFailed {
                    message: FETCH_FAILED.to_string(),
                });
                phase
            }
        }
    }

    /// Changes a complaint's status optimistically.
    ///
    /// The view shows the new status and a local `updatedAt` while the
    /// backend call is in flight. A confirmed change is kept as shown; an
    /// error or a not-found answer restores the prior view exactly and
    /// raises [`UPDATE_FAILED`]. There is no retry.
    pub async fn apply_status_change(
        &self,
        id: &str,
        status: ComplaintStatus,
    ) -> StatusChangeOutcome {
        let (snapshot, previous) = {
            let mut state = self.write();
            let snapshot = state.complaints.clone();
            let now = self.clock.now();
            let mut previous = None;
            for complaint in state.complaints.iter_mut().filter(|c| c.id == id) {
                previous = Some(complaint.status);
                complaint.status = status;
                complaint.updated_at = complaint.updated_at.max(now);
            }
            (snapshot, previous)
        };

        if let Some(from) = previous {
            self.events.send(DashboardEventKind::StatusApplied {
                complaint_id: id.to_string(),
                from,
                to: status,
            });
        }

        let result = self
            .backend
            .update_status(id, status)
            .instrument(info_span!("dashboard.apply_status_change", id = %id, status = ?status))
            .await;

        match result {
            Ok(Some(confirmed)) => {
                self.events.send(DashboardEventKind::StatusConfirmed {
                    complaint_id: confirmed.id.clone(),
                    status: confirmed.status,
                });
                StatusChangeOutcome::Confirmed(confirmed)
            }
            Ok(None) => {
                log::warn!("Status change for {} was not applied: no such complaint", id);
                self.revert(id, snapshot)
            }
            Err(e) => {
                log::error!("Status change for {} failed: {}", id, e);
                self.revert(id, snapshot)
            }
        }
    }

    fn revert(&self, id: &str, snapshot: Vec<Complaint>) -> StatusChangeOutcome {
        {
            let mut state = self.write();
            state.complaints = snapshot;
            state.notice = Some(UPDATE_FAILED.to_string());
        }
        self.events.send(DashboardEventKind::StatusReverted {
            complaint_id: id.to_string(),
            message: UPDATE_FAILED.to_string(),
        });
        StatusChangeOutcome::Reverted
    }

    /// Returns the pending notice, if any, and clears it.
    pub fn take_notice(&self) -> Option<String> {
        self.write().notice.take()
    }

    pub fn phase(&self) -> LoadPhase {
        self.read().phase.clone()
    }

    /// Copy of the current view, in display order.
    pub fn complaints(&self) -> Vec<Complaint> {
        self.read().complaints.clone()
    }

    /// Groups the current view into status columns.
    pub fn board(&self) -> Board {
        Board::project(&self.read().complaints)
    }

    pub fn view(&self) -> DashboardView {
        let state = self.read();
        match &state.phase {
            LoadPhase::Loading => DashboardView::Loading,
            LoadPhase::Failed { message } => DashboardView::Failed {
                message: message.clone(),
            },
            LoadPhase::Ready => DashboardView::Ready(Board::project(&state.complaints)),
        }
    }

    /// Opens the detail panel for a complaint in the view.
    ///
    /// Returns the complaint shown, or `None` if the view has no such id.
    pub fn open_details(&self, id: &str) -> Option<Complaint> {
        let mut state = self.write();
        let complaint = state.complaints.iter().find(|c| c.id == id).cloned()?;
        state.detail = Some(DetailPanel::open(complaint.clone()));
        Some(complaint)
    }

    pub fn close_details(&self) {
        self.write().detail = None;
    }

    pub fn selected(&self) -> Option<DetailPanel> {
        self.read().detail.clone()
    }

    /// Generates a summary for the complaint in the open detail panel.
    ///
    /// The result is stored in the panel unless it was closed or switched
    /// to another complaint meanwhile. Returns the generated text, or
    /// `None` when no panel is open.
    pub async fn generate_summary(&self, generator: &dyn SummaryGenerator) -> Option<String> {
        let complaint = {
            let mut state = self.write();
            let panel = state.detail.as_mut()?;
            panel.summary = SummaryState::Generating;
            panel.complaint.clone()
        };

        let text = generator.generate_summary(&complaint).await;

        let mut state = self.write();
        if let Some(panel) = state.detail.as_mut().filter(|p| p.shows(&complaint.id)) {
            panel.summary = SummaryState::ready(text.clone());
        }
        Some(text)
    }
}

//! Dashboard event broadcaster for observers of the reconciliation flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::complaint::ComplaintStatus;

/// What happened on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEventKind {
    /// The view was replaced with a fresh listing.
    Refreshed { count: usize },
    /// Listing failed; the board is hidden behind an error.
    LoadFailed { message: String },
    /// A status change was applied to the view ahead of persistence.
    StatusApplied {
        #[serde(rename = "complaintId")]
        complaint_id: String,
        from: ComplaintStatus,
        to: ComplaintStatus,
    },
    /// Persistence confirmed an optimistic change.
    StatusConfirmed {
        #[serde(rename = "complaintId")]
        complaint_id: String,
        status: ComplaintStatus,
    },
    /// An optimistic change was rolled back.
    StatusReverted {
        #[serde(rename = "complaintId")]
        complaint_id: String,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEvent {
    #[serde(flatten)]
    pub kind: DashboardEventKind,
    pub timestamp: DateTime<Utc>,
}

impl DashboardEvent {
    pub fn new(kind: DashboardEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Fans dashboard events out to any number of subscribers.
#[derive(Clone)]
pub struct DashboardBroadcaster {
    sender: Arc<broadcast::Sender<DashboardEvent>>,
}

impl DashboardBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn send(&self, kind: DashboardEventKind) {
        // No active receivers is fine
        let _ = self.sender.send(DashboardEvent::new(kind));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }
}

impl Default for DashboardBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

//! The complaint detail panel and its summary state.

use crate::complaint::Complaint;
use crate::summary::format_summary;

/// Progress of the summary shown in the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SummaryState {
    #[default]
    Idle,
    Generating,
    Ready {
        /// Text as returned by the generator, failure texts included.
        text: String,
        /// `text` rendered for display.
        html: String,
    },
}

impl SummaryState {
    pub fn ready(text: String) -> Self {
        let html = format_summary(&text);
        SummaryState::Ready { text, html }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, SummaryState::Generating)
    }
}

/// An open detail panel.
///
/// Holds a copy of the complaint taken when the panel was opened; later
/// view changes do not alter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub complaint: Complaint,
    pub summary: SummaryState,
}

impl DetailPanel {
    pub fn open(complaint: Complaint) -> Self {
        Self {
            complaint,
            summary: SummaryState::Idle,
        }
    }

    pub fn shows(&self, id: &str) -> bool {
        self.complaint.id == id
    }
}

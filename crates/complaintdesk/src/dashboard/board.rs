//! Grouping of the dashboard view into status columns.

use serde::Serialize;

use crate::complaint::{Complaint, ComplaintStatus};

/// Shown in a column that holds no complaints.
pub const EMPTY_COLUMN_TEXT: &str = "ไม่มีเรื่องร้องเรียน";

/// Column heading for a status.
pub fn column_title(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "รับเรื่องแล้ว (Pending)",
        ComplaintStatus::InProgress => "กำลังดำเนินการ (In Progress)",
        ComplaintStatus::Resolved => "แก้ไขเรียบร้อยแล้ว (Resolved)",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub status: ComplaintStatus,
    pub title: &'static str,
    pub complaints: Vec<Complaint>,
}

impl Column {
    pub fn count(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }

    /// Heading with the item count, e.g. `รับเรื่องแล้ว (Pending) (2)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.count())
    }
}

/// The three status columns, Pending first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Splits `view` by status. Each column keeps the view's order.
    pub fn project(view: &[Complaint]) -> Self {
        let columns = ComplaintStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                title: column_title(status),
                complaints: view.iter().filter(|c| c.status == status).cloned().collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, status: ComplaintStatus) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Column::count).sum()
    }
}

/// Statuses the dashboard offers for a complaint card.
///
/// Resolved complaints offer none. The repository itself accepts any
/// transition.
pub fn status_choices(complaint: &Complaint) -> Option<Vec<ComplaintStatus>> {
    if complaint.is_resolved() {
        return None;
    }
    Some(
        ComplaintStatus::ALL
            .into_iter()
            .filter(|s| *s != complaint.status)
            .collect(),
    )
}

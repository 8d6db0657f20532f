//! The staff dashboard: view state, optimistic status changes and the
//! projections the presentation layer renders.

pub mod board;
pub mod controller;
pub mod detail;
pub mod events;

pub use board::{column_title, status_choices, Board, Column, EMPTY_COLUMN_TEXT};
pub use controller::{
    ComplaintBackend, DashboardController, DashboardView, LoadPhase, StatusChangeOutcome,
    FETCH_FAILED, UPDATE_FAILED,
};
pub use detail::{DetailPanel, SummaryState};
pub use events::{DashboardBroadcaster, DashboardEvent, DashboardEventKind};

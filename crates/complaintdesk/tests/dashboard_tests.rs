//! Dashboard reconciliation against a real repository.

mod common;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use common::{start_time, ComplaintBuilder, TestHarness};
use complaintdesk::complaint::ManualClock;
use complaintdesk::dashboard::{
    DashboardController, DashboardEventKind, DashboardView, LoadPhase, StatusChangeOutcome,
    FETCH_FAILED, UPDATE_FAILED,
};
use complaintdesk::repository::default_fixtures;
use complaintdesk::storage::{Latency, MemoryStorage};
use complaintdesk::{ComplaintRepository, ComplaintStatus, RecordStore};

async fn seeded() -> TestHarness {
    let harness = TestHarness::memory();
    harness
        .repository
        .seed_if_empty(&default_fixtures())
        .await
        .unwrap();
    harness
}

#[tokio::test]
async fn test_failed_update_reverts_view_exactly() {
    let harness = seeded().await;
    let dashboard = harness.dashboard();
    dashboard.refresh().await;
    let before = dashboard.complaints();
    let stored_before = harness.raw().await;
    let target = before
        .iter()
        .find(|c| c.status == ComplaintStatus::Pending)
        .unwrap()
        .clone();

    harness.tick(120);
    harness.storage.fail_writes(true);
    let outcome = dashboard
        .apply_status_change(&target.id, ComplaintStatus::InProgress)
        .await;
    harness.storage.fail_writes(false);

    assert_eq!(outcome, StatusChangeOutcome::Reverted);
    let after = dashboard.complaints();
    assert_eq!(after, before);
    let reverted = after.iter().find(|c| c.id == target.id).unwrap();
    assert_eq!(reverted.status, ComplaintStatus::Pending);
    assert_eq!(reverted.updated_at, target.updated_at);
    assert_eq!(harness.raw().await, stored_before);

    assert_eq!(dashboard.take_notice().as_deref(), Some(UPDATE_FAILED));
    assert_eq!(dashboard.take_notice(), None);
}

#[tokio::test]
async fn test_confirmed_update_is_visible_in_store_and_view() {
    let harness = seeded().await;
    let dashboard = harness.dashboard();
    dashboard.refresh().await;
    let target = dashboard.complaints()[1].clone();

    harness.tick(300);
    let outcome = dashboard
        .apply_status_change(&target.id, ComplaintStatus::Resolved)
        .await;

    let StatusChangeOutcome::Confirmed(confirmed) = outcome else {
        panic!("expected confirmation");
    };
    assert_eq!(confirmed.status, ComplaintStatus::Resolved);

    let shown = dashboard
        .complaints()
        .into_iter()
        .find(|c| c.id == target.id)
        .unwrap();
    assert_eq!(shown.status, ComplaintStatus::Resolved);
    assert_eq!(shown.updated_at, start_time() + chrono::Duration::seconds(300));

    let stored = harness.repository.find(&target.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ComplaintStatus::Resolved);

    let board = dashboard.board();
    assert_eq!(board.column(ComplaintStatus::Resolved).unwrap().count(), 1);
    assert_eq!(board.column(ComplaintStatus::Pending).unwrap().count(), 2);
    assert_eq!(dashboard.take_notice(), None);
}

#[tokio::test]
async fn test_record_missing_from_store_reverts() {
    let harness = seeded().await;
    let dashboard = harness.dashboard();
    dashboard.refresh().await;
    let before = dashboard.complaints();

    harness.write_raw("[]").await;
    let outcome = dashboard
        .apply_status_change(&before[0].id, ComplaintStatus::InProgress)
        .await;

    assert_eq!(outcome, StatusChangeOutcome::Reverted);
    assert_eq!(dashboard.complaints(), before);
    assert_eq!(harness.raw().await.as_deref(), Some("[]"));
    assert_eq!(dashboard.take_notice().as_deref(), Some(UPDATE_FAILED));
}

#[tokio::test]
async fn test_read_fault_shows_error_instead_of_board() {
    let harness = seeded().await;
    let dashboard = harness.dashboard();
    let mut events = dashboard.events().subscribe();

    harness.storage.fail_reads(true);
    let phase = dashboard.refresh().await;
    harness.storage.fail_reads(false);

    assert_eq!(
        phase,
        LoadPhase::Failed {
            message: FETCH_FAILED.to_string()
        }
    );
    assert_eq!(
        dashboard.view(),
        DashboardView::Failed {
            message: "Failed to fetch complaints.".to_string()
        }
    );
    assert!(matches!(
        events.try_recv().unwrap().kind,
        DashboardEventKind::LoadFailed { .. }
    ));

    dashboard.refresh().await;
    match dashboard.view() {
        DashboardView::Ready(board) => assert_eq!(board.total(), 3),
        other => panic!("expected board, got {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupted_store_shows_empty_board() {
    let harness = TestHarness::file();
    harness.write_raw("not json").await;
    let dashboard = harness.dashboard();

    assert_eq!(dashboard.refresh().await, LoadPhase::Ready);
    match dashboard.view() {
        DashboardView::Ready(board) => {
            assert_eq!(board.total(), 0);
            assert!(board.columns.iter().all(|c| c.is_empty()));
        }
        other => panic!("expected board, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refresh_picks_up_new_submissions() {
    let harness = seeded().await;
    let dashboard = harness.dashboard();
    dashboard.refresh().await;

    harness.tick(10);
    let created = harness
        .repository
        .create(ComplaintBuilder::new().build())
        .await
        .unwrap();
    assert_eq!(dashboard.complaints().len(), 3);

    dashboard.refresh().await;
    let view = dashboard.complaints();
    assert_eq!(view.len(), 4);
    assert_eq!(view[0], created);
}

#[tokio::test(start_paused = true)]
async fn test_simulated_latency_applies_to_round_trip() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let store = RecordStore::new(Arc::new(MemoryStorage::new()))
        .with_latency(Latency::simulated(StdDuration::from_millis(500)));
    let repository = Arc::new(ComplaintRepository::with_clock(store, clock.clone()));
    repository
        .create(ComplaintBuilder::new().build())
        .await
        .unwrap();
    let dashboard = DashboardController::new(repository.clone(), clock);
    dashboard.refresh().await;
    let id = dashboard.complaints()[0].id.clone();

    let started = tokio::time::Instant::now();
    let outcome = dashboard
        .apply_status_change(&id, ComplaintStatus::InProgress)
        .await;

    assert!(matches!(outcome, StatusChangeOutcome::Confirmed(_)));
    assert!(started.elapsed() >= StdDuration::from_millis(1000));
}

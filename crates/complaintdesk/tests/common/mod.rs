//! Shared test utilities for complaintdesk integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated tests over a chosen storage medium
//! - `FaultyStorage` for simulating medium failures
//! - Builders for submission fields and configurations

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{start_time, FaultyStorage, TestHarness};

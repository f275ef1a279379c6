//! Shared test utilities for flashcard-scheduler integration tests.
//!
//! All timestamps are fixed so results never depend on the clock.

#![allow(dead_code)]

pub mod fixtures;

use chrono::{DateTime, TimeZone, Utc};

/// Reference "now" used across integration tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 7, 15, 30, 0).unwrap()
}

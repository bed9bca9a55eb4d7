//! Application layer use cases for the seatmap engine.
//!
//! This layer sits between the domain (`seatmap-core`, pure business rules)
//! and the infrastructure (persistence adapters, viewer bridge). Use cases
//! here orchestrate domain objects to fulfil a user goal, depend on
//! abstractions rather than concrete implementations, and contain no file
//! system or network access of their own.
//!
//! # Sub-modules
//!
//! - **`edit_session`** – Owns one document for the duration of an admin
//!   editing scope and turns viewer intents into validated, atomic
//!   mutations. This is the command pipeline every seat press flows
//!   through.
//!
//! - **`assign_seats`** – The fixed-seating protocol: binds and releases a
//!   person on a seat while keeping the one-seat-per-person and
//!   one-person-per-seat invariants.
//!
//! - **`publish_layout`** – The draft/publish lifecycle: validates the
//!   draft, snapshots it through the persistence adapter, and controls what
//!   non-admin viewers get to see.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod assign_seats;
pub mod edit_session;
pub mod publish_layout;

/// Current time as epoch milliseconds, used for publish and audit stamps.
pub(crate) fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

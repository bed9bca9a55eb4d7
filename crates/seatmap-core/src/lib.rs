//! # seatmap-core
//!
//! Domain entities, seat status machine, and JSON wire format for the
//! seatmap layout engine.
//!
//! This crate is the shared foundation of the seatmap workspace. It has zero
//! dependencies on OS APIs, UI frameworks, or network sockets, so it can be
//! embedded in any host: the admin editor, a rendering client, or a test
//! harness.
//!
//! The crate defines:
//!
//! - **`domain`** – Pure business logic. The central piece is the
//!   [`LayoutDocument`]: the aggregate owning a library's seating floor plan
//!   (categories, sections, seats, drawing primitives) together with its
//!   referential-integrity rules, plus the [`SeatStatus`] state machine that
//!   governs per-seat transitions.
//!
//! - **`wire`** – How documents travel and persist: one JSON object per
//!   layout, camelCase keys, seat status inline, unknown fields preserved
//!   through extension bags so foreign documents round-trip losslessly.

pub mod domain;
pub mod wire;

// Re-export the most-used types at the crate root so callers can write
// `seatmap_core::LayoutDocument` instead of the full module path.
pub use domain::document::{
    Category, CategoryId, DependencyError, IntegrityError, LayoutDocument, LayoutVersion,
    OccupancyStats, PersonId, ReferenceError, Seat, SeatId, Section, SectionId, Workspace,
};
pub use domain::geometry::{
    GeometryError, ImageAnchor, Point, Polyline, Shape, TextLabel,
};
pub use domain::status::{InvalidTransitionError, SeatEvent, SeatStatus};
pub use wire::json::{from_json, from_value, to_json, to_value, WireError};

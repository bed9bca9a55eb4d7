//! Wire format for layout documents.
//!
//! Layouts travel and persist as a single JSON object matching the
//! [`LayoutDocument`](crate::domain::document::LayoutDocument) shape. Seat
//! status and the assigned person id are stored inline with each seat; there
//! is no separate status table.

pub mod json;

//! Fixed-seating protocol: binding a person to a seat and releasing it.
//!
//! A fixed seat is permanently bound to one person, as opposed to free
//! (walk-in) seating. The protocol enforces two invariants across one layout
//! document:
//!
//! - at most one seat per person, and
//! - at most one person per seat.
//!
//! Re-assignment always requires an explicit unassign first; there is no
//! implicit overwrite. Every successful call yields an [`AuditEntry`] the
//! caller hands to the persistence adapter, which keeps the append-only
//! assignment history.

use seatmap_core::{LayoutDocument, PersonId, SeatId, SeatStatus, SectionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::epoch_ms;

/// Assignment-protocol violation. All variants are recoverable: the caller
/// fixes the request and retries, the document is left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum AssignmentError {
    /// The seat id does not exist in the document.
    #[error("unknown seat: {0}")]
    UnknownSeat(SeatId),

    /// The seat's section is free seating; seats there are walk-in only.
    #[error("section {0} is free seating; its seats cannot be individually assigned")]
    SectionNotAssignable(SectionId),

    /// The seat is not currently available.
    #[error("seat {seat_id} is {status:?}, not available")]
    SeatUnavailable { seat_id: SeatId, status: SeatStatus },

    /// The person already holds a fixed seat in this layout.
    #[error("person {person_id} already holds seat {seat_id}")]
    PersonAlreadyAssigned { person_id: PersonId, seat_id: SeatId },

    /// Unassign was requested for a person who does not hold the seat.
    #[error("seat {seat_id} is not assigned to person {person_id}")]
    NotAssigned { seat_id: SeatId, person_id: PersonId },
}

/// What an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Assign,
    Unassign,
}

/// One append-only history record of an assignment change.
///
/// The engine only needs the current binding on the seat itself; the full
/// history lives with the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub seat_id: SeatId,
    pub person_id: PersonId,
    pub action: AuditAction,
    pub timestamp_ms: u64,
}

/// Binds `person_id` to the seat as its fixed occupant.
///
/// On success the seat's `assigned_person_id` is set, the seat transitions
/// to occupied, and an [`AuditEntry`] is returned for the adapter's history.
///
/// # Errors
///
/// In check order: [`AssignmentError::UnknownSeat`],
/// [`AssignmentError::SectionNotAssignable`],
/// [`AssignmentError::SeatUnavailable`], and
/// [`AssignmentError::PersonAlreadyAssigned`]. On any error the document is
/// unchanged.
pub fn assign_fixed(
    doc: &mut LayoutDocument,
    seat_id: &str,
    person_id: &str,
) -> Result<AuditEntry, AssignmentError> {
    let seat = doc
        .seat(seat_id)
        .ok_or_else(|| AssignmentError::UnknownSeat(seat_id.to_string()))?;

    // A dangling section reference cannot prove the section is assignable,
    // so it is rejected the same way a free-seating section is.
    let assignable = doc
        .section(&seat.section_id)
        .map(|section| !section.free_seating)
        .unwrap_or(false);
    if !assignable {
        return Err(AssignmentError::SectionNotAssignable(seat.section_id.clone()));
    }

    if seat.status != SeatStatus::Available {
        return Err(AssignmentError::SeatUnavailable {
            seat_id: seat_id.to_string(),
            status: seat.status,
        });
    }

    if let Some(held) = doc.seat_of_person(person_id) {
        return Err(AssignmentError::PersonAlreadyAssigned {
            person_id: person_id.to_string(),
            seat_id: held.id.clone(),
        });
    }

    // Guards passed: the seat is known, assignable, and available, so the
    // available -> occupied transition cannot fail.
    let seat = doc
        .seat_mut(seat_id)
        .ok_or_else(|| AssignmentError::UnknownSeat(seat_id.to_string()))?;
    seat.assigned_person_id = Some(person_id.to_string());
    seat.status = SeatStatus::Occupied;

    info!(seat = seat_id, person = person_id, "fixed seat assigned");
    Ok(AuditEntry {
        seat_id: seat_id.to_string(),
        person_id: person_id.to_string(),
        action: AuditAction::Assign,
        timestamp_ms: epoch_ms(),
    })
}

/// Releases the fixed assignment binding `person_id` to the seat.
///
/// On success the binding is cleared, the seat returns to available, and an
/// [`AuditEntry`] is returned.
///
/// # Errors
///
/// Returns [`AssignmentError::UnknownSeat`] if the seat id does not exist,
/// or [`AssignmentError::NotAssigned`] if the seat is not currently bound to
/// this person.
pub fn unassign_fixed(
    doc: &mut LayoutDocument,
    seat_id: &str,
    person_id: &str,
) -> Result<AuditEntry, AssignmentError> {
    let seat = doc
        .seat(seat_id)
        .ok_or_else(|| AssignmentError::UnknownSeat(seat_id.to_string()))?;

    if seat.assigned_person_id.as_deref() != Some(person_id) {
        return Err(AssignmentError::NotAssigned {
            seat_id: seat_id.to_string(),
            person_id: person_id.to_string(),
        });
    }

    let seat = doc
        .seat_mut(seat_id)
        .ok_or_else(|| AssignmentError::UnknownSeat(seat_id.to_string()))?;
    seat.assigned_person_id = None;
    seat.status = SeatStatus::Available;

    info!(seat = seat_id, person = person_id, "fixed seat released");
    Ok(AuditEntry {
        seat_id: seat_id.to_string(),
        person_id: person_id.to_string(),
        action: AuditAction::Unassign,
        timestamp_ms: epoch_ms(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::{Point, Seat};
    use serde_json::Map;

    /// Document with one assignable section, one free-seating section, and a
    /// category; returns (doc, assignable_section, free_section, category).
    fn make_doc() -> (LayoutDocument, String, String, String) {
        let mut doc = LayoutDocument::new("test");
        let assignable = doc.add_section("A", "#eeeeee", "#999999", false);
        let free = doc.add_section("Lounge", "#eeeeee", "#999999", true);
        let category = doc.categories[0].id.clone();
        (doc, assignable, free, category)
    }

    fn add_seat(doc: &mut LayoutDocument, id: &str, section_id: &str, category_id: &str) {
        doc.upsert_seat(Seat {
            id: id.to_string(),
            label: id.to_uppercase(),
            section_id: section_id.to_string(),
            category_id: category_id.to_string(),
            position: Point::new(0.0, 0.0),
            status: SeatStatus::Available,
            assigned_person_id: None,
            extra: Map::new(),
        })
        .expect("test seats reference existing entities");
    }

    // ── assign_fixed ──────────────────────────────────────────────────────────

    #[test]
    fn test_assign_fixed_occupies_seat_and_binds_person() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);

        let entry = assign_fixed(&mut doc, "s1", "p1").expect("assignment must succeed");

        let seat = doc.seat("s1").unwrap();
        assert_eq!(seat.status, SeatStatus::Occupied);
        assert_eq!(seat.assigned_person_id.as_deref(), Some("p1"));
        assert_eq!(entry.action, AuditAction::Assign);
        assert_eq!(entry.seat_id, "s1");
        assert_eq!(entry.person_id, "p1");
    }

    #[test]
    fn test_assign_fixed_rejects_unknown_seat() {
        let (mut doc, ..) = make_doc();
        assert_eq!(
            assign_fixed(&mut doc, "ghost", "p1"),
            Err(AssignmentError::UnknownSeat("ghost".to_string()))
        );
    }

    #[test]
    fn test_assign_fixed_rejects_free_seating_section_and_leaves_status() {
        let (mut doc, _, free, category) = make_doc();
        add_seat(&mut doc, "s1", &free, &category);

        assert_eq!(
            assign_fixed(&mut doc, "s1", "p1"),
            Err(AssignmentError::SectionNotAssignable(free))
        );
        let seat = doc.seat("s1").unwrap();
        assert_eq!(seat.status, SeatStatus::Available, "status unchanged");
        assert_eq!(seat.assigned_person_id, None);
    }

    #[test]
    fn test_assign_fixed_rejects_occupied_seat_with_seat_unavailable() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);
        assign_fixed(&mut doc, "s1", "p1").unwrap();

        assert_eq!(
            assign_fixed(&mut doc, "s1", "p2"),
            Err(AssignmentError::SeatUnavailable {
                seat_id: "s1".to_string(),
                status: SeatStatus::Occupied,
            })
        );
        // First binding is untouched.
        assert_eq!(doc.seat("s1").unwrap().assigned_person_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_assign_fixed_rejects_reserved_seat() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);
        doc.seat_mut("s1").unwrap().status = SeatStatus::Reserved;

        assert!(matches!(
            assign_fixed(&mut doc, "s1", "p1"),
            Err(AssignmentError::SeatUnavailable { .. })
        ));
    }

    #[test]
    fn test_assign_fixed_rejects_person_holding_another_seat() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);
        add_seat(&mut doc, "s2", &section, &category);
        assign_fixed(&mut doc, "s1", "p1").unwrap();

        assert_eq!(
            assign_fixed(&mut doc, "s2", "p1"),
            Err(AssignmentError::PersonAlreadyAssigned {
                person_id: "p1".to_string(),
                seat_id: "s1".to_string(),
            })
        );
        assert_eq!(doc.seat("s2").unwrap().assigned_person_id, None);
    }

    // ── unassign_fixed ────────────────────────────────────────────────────────

    #[test]
    fn test_assign_then_unassign_round_trips_to_available() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);

        assign_fixed(&mut doc, "s1", "p1").unwrap();
        let entry = unassign_fixed(&mut doc, "s1", "p1").expect("unassign must succeed");

        let seat = doc.seat("s1").unwrap();
        assert_eq!(seat.status, SeatStatus::Available);
        assert_eq!(seat.assigned_person_id, None);
        assert_eq!(entry.action, AuditAction::Unassign);
    }

    #[test]
    fn test_unassign_fixed_rejects_wrong_person() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);
        assign_fixed(&mut doc, "s1", "p1").unwrap();

        assert_eq!(
            unassign_fixed(&mut doc, "s1", "p2"),
            Err(AssignmentError::NotAssigned {
                seat_id: "s1".to_string(),
                person_id: "p2".to_string(),
            })
        );
        assert_eq!(doc.seat("s1").unwrap().assigned_person_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_unassign_fixed_rejects_unassigned_seat() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);

        assert!(matches!(
            unassign_fixed(&mut doc, "s1", "p1"),
            Err(AssignmentError::NotAssigned { .. })
        ));
    }

    #[test]
    fn test_reassignment_requires_explicit_unassign() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);

        assign_fixed(&mut doc, "s1", "p1").unwrap();
        assert!(assign_fixed(&mut doc, "s1", "p2").is_err(), "no implicit overwrite");

        unassign_fixed(&mut doc, "s1", "p1").unwrap();
        assert!(assign_fixed(&mut doc, "s1", "p2").is_ok());
        assert_eq!(doc.seat("s1").unwrap().assigned_person_id.as_deref(), Some("p2"));
    }

    #[test]
    fn test_assignment_keeps_document_valid() {
        let (mut doc, section, _, category) = make_doc();
        add_seat(&mut doc, "s1", &section, &category);

        assign_fixed(&mut doc, "s1", "p1").unwrap();
        assert_eq!(doc.validate(), Ok(()));

        unassign_fixed(&mut doc, "s1", "p1").unwrap();
        assert_eq!(doc.validate(), Ok(()));
    }
}

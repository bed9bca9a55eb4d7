//! One admin editing scope over one layout document.
//!
//! The session is the single writer for its document: there is no ambient or
//! global layout object. The viewer never mutates anything; it emits
//! intents, the caller turns them into a [`Command`], and [`EditSession::handle`]
//! validates the command against the seat status machine and the assignment
//! protocol before applying it. On success the caller re-renders from the
//! updated snapshot.
//!
//! # Atomicity
//!
//! A command is one logical edit. Multi-seat commands (bulk maintenance)
//! validate every transition first and only then apply any of them: either
//! the whole command lands or the document is untouched. Partial application
//! would leave the document inconsistent and is disallowed.
//!
//! # Assignment coupling
//!
//! Seats holding a fixed assignment only change status through the
//! assignment protocol. Any plain status event on such a seat is rejected
//! with [`CommandError::AssignmentHeld`]; releasing the person first with
//! [`Command::UnassignFixed`] is the only path back to available. This is
//! what keeps "assigned person present" equivalent to "occupied via
//! assignment" under every command sequence.

use seatmap_core::{
    InvalidTransitionError, LayoutDocument, PersonId, SeatEvent, SeatId, SeatStatus,
};
use thiserror::Error;
use tracing::debug;

use super::assign_seats::{assign_fixed, unassign_fixed, AssignmentError, AuditEntry};

/// A validated mutation request produced from a viewer intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply one status-machine event to one seat.
    SeatEvent { seat_id: SeatId, event: SeatEvent },
    /// Move every listed seat into maintenance, atomically.
    BulkMaintenance { seat_ids: Vec<SeatId> },
    /// Clear maintenance on every listed seat, atomically.
    ClearBulkMaintenance { seat_ids: Vec<SeatId> },
    /// Bind a person to a seat as its fixed occupant.
    AssignFixed { seat_id: SeatId, person_id: PersonId },
    /// Release a fixed occupant from a seat.
    UnassignFixed { seat_id: SeatId, person_id: PersonId },
}

/// Why a command was rejected. The document is unchanged in every case.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    /// The command referenced a seat id not present in the document.
    #[error("unknown seat: {0}")]
    UnknownSeat(SeatId),

    /// A status event targeted a seat holding a fixed assignment.
    #[error("seat {0} holds a fixed assignment; release it with an explicit unassign")]
    AssignmentHeld(SeatId),

    /// The status machine rejected the transition.
    #[error(transparent)]
    Transition(#[from] InvalidTransitionError),

    /// The assignment protocol rejected the request.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

/// Owns one [`LayoutDocument`] for the duration of an editing scope.
pub struct EditSession {
    doc: LayoutDocument,
    /// Audit entries produced by assignment commands, not yet persisted.
    audit_outbox: Vec<AuditEntry>,
}

impl EditSession {
    pub fn new(doc: LayoutDocument) -> Self {
        Self {
            doc,
            audit_outbox: Vec::new(),
        }
    }

    /// The current document snapshot.
    pub fn document(&self) -> &LayoutDocument {
        &self.doc
    }

    /// Mutable document access for structural edits (seat upserts, section
    /// and category management). Those operations carry their own guards on
    /// [`LayoutDocument`]; status and assignment changes must go through
    /// [`handle`](EditSession::handle) instead.
    pub fn document_mut(&mut self) -> &mut LayoutDocument {
        &mut self.doc
    }

    /// Ends the session, yielding the document for persistence.
    pub fn into_document(self) -> LayoutDocument {
        self.doc
    }

    /// Takes all audit entries accumulated since the last drain. The caller
    /// forwards them to the persistence adapter's history.
    pub fn drain_audit(&mut self) -> Vec<AuditEntry> {
        std::mem::take(&mut self.audit_outbox)
    }

    /// Validates and applies one command, returning the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] and leaves the document untouched when any
    /// part of the command fails validation.
    pub fn handle(&mut self, command: Command) -> Result<&LayoutDocument, CommandError> {
        debug!(?command, "handling command");
        match command {
            Command::SeatEvent { seat_id, event } => self.apply_seat_event(&seat_id, event)?,
            Command::BulkMaintenance { seat_ids } => {
                self.apply_bulk(&seat_ids, SeatEvent::MarkMaintenance)?
            }
            Command::ClearBulkMaintenance { seat_ids } => {
                self.apply_bulk(&seat_ids, SeatEvent::ClearMaintenance)?
            }
            Command::AssignFixed { seat_id, person_id } => {
                let entry = assign_fixed(&mut self.doc, &seat_id, &person_id)?;
                self.audit_outbox.push(entry);
            }
            Command::UnassignFixed { seat_id, person_id } => {
                let entry = unassign_fixed(&mut self.doc, &seat_id, &person_id)?;
                self.audit_outbox.push(entry);
            }
        }
        Ok(&self.doc)
    }

    fn apply_seat_event(&mut self, seat_id: &str, event: SeatEvent) -> Result<(), CommandError> {
        let next = self.check_seat_event(seat_id, event)?;
        if let Some(seat) = self.doc.seat_mut(seat_id) {
            seat.status = next;
        }
        Ok(())
    }

    /// Validates a single-seat event without applying it.
    fn check_seat_event(&self, seat_id: &str, event: SeatEvent) -> Result<SeatStatus, CommandError> {
        let seat = self
            .doc
            .seat(seat_id)
            .ok_or_else(|| CommandError::UnknownSeat(seat_id.to_string()))?;
        if seat.assigned_person_id.is_some() {
            return Err(CommandError::AssignmentHeld(seat_id.to_string()));
        }
        Ok(seat.status.apply(event)?)
    }

    /// Two-phase bulk application: validate every seat, then commit every
    /// seat. Any failure in the first phase aborts the whole command.
    fn apply_bulk(&mut self, seat_ids: &[SeatId], event: SeatEvent) -> Result<(), CommandError> {
        let mut staged = Vec::with_capacity(seat_ids.len());
        for seat_id in seat_ids {
            staged.push((seat_id.as_str(), self.check_seat_event(seat_id, event)?));
        }
        for (seat_id, next) in staged {
            if let Some(seat) = self.doc.seat_mut(seat_id) {
                seat.status = next;
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Per-seat status state machine.
//!
//! Seats cycle through `available → reserved → occupied → available` during
//! normal use, with `maintenance` reachable from any state and returning only
//! to `available`:
//!
//! ```text
//!              reserve              checkIn
//! Available ──────────► Reserved ──────────► Occupied
//!     ▲  ▲                  │                    │
//!     │  └──────────────────┘ cancelReservation  │
//!     └──────────────────────────────────────────┘ checkOut
//!
//! any state ── markMaintenance ──► Maintenance ── clearMaintenance ──► Available
//! ```
//!
//! Transitions are applied one seat at a time and the machine holds no
//! cross-seat state. Re-sending an already-satisfied event (for example a
//! second `CheckIn` on an occupied seat) is rejected by the transition table
//! itself, so callers get idempotence checks without any deduplication layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current status of a single seat.
///
/// Serialized in lowercase on the wire (`"available"`, `"reserved"`, ...)
/// because the layout JSON stores seat status inline with the seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
    Occupied,
    Maintenance,
}

impl Default for SeatStatus {
    fn default() -> Self {
        SeatStatus::Available
    }
}

/// An event that may move a seat from one status to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeatEvent {
    Reserve,
    CheckIn,
    CancelReservation,
    CheckOut,
    MarkMaintenance,
    ClearMaintenance,
}

/// A transition not present in the table was requested.
///
/// Recoverable: callers surface this to the user as "action not allowed
/// right now" and leave the seat untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot apply {event:?} to a seat in the {from:?} state")]
pub struct InvalidTransitionError {
    pub from: SeatStatus,
    pub event: SeatEvent,
}

impl SeatStatus {
    /// Applies `event` to this status and returns the resulting status.
    ///
    /// The full transition table:
    ///
    /// | from        | event              | to          |
    /// |-------------|--------------------|-------------|
    /// | available   | reserve            | reserved    |
    /// | available   | checkIn            | occupied    |
    /// | reserved    | checkIn            | occupied    |
    /// | reserved    | cancelReservation  | available   |
    /// | occupied    | checkOut           | available   |
    /// | any         | markMaintenance    | maintenance |
    /// | maintenance | clearMaintenance   | available   |
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransitionError`] for any pair not in the table.
    pub fn apply(self, event: SeatEvent) -> Result<SeatStatus, InvalidTransitionError> {
        use SeatEvent::*;
        use SeatStatus::*;

        match (self, event) {
            (Available, Reserve) => Ok(Reserved),
            (Available, CheckIn) => Ok(Occupied),
            (Reserved, CheckIn) => Ok(Occupied),
            (Reserved, CancelReservation) => Ok(Available),
            (Occupied, CheckOut) => Ok(Available),
            (_, MarkMaintenance) => Ok(Maintenance),
            (Maintenance, ClearMaintenance) => Ok(Available),
            (from, event) => Err(InvalidTransitionError { from, event }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use SeatEvent::*;
    use SeatStatus::*;

    // ── Normal cycle ──────────────────────────────────────────────────────────

    #[test]
    fn test_available_reserve_yields_reserved() {
        assert_eq!(Available.apply(Reserve), Ok(Reserved));
    }

    #[test]
    fn test_available_check_in_yields_occupied() {
        assert_eq!(Available.apply(CheckIn), Ok(Occupied));
    }

    #[test]
    fn test_reserved_check_in_yields_occupied() {
        assert_eq!(Reserved.apply(CheckIn), Ok(Occupied));
    }

    #[test]
    fn test_reserved_cancel_yields_available() {
        assert_eq!(Reserved.apply(CancelReservation), Ok(Available));
    }

    #[test]
    fn test_occupied_check_out_yields_available() {
        assert_eq!(Occupied.apply(CheckOut), Ok(Available));
    }

    #[test]
    fn test_full_cycle_returns_to_available() {
        let status = Available
            .apply(Reserve)
            .and_then(|s| s.apply(CheckIn))
            .and_then(|s| s.apply(CheckOut));
        assert_eq!(status, Ok(Available));
    }

    // ── Maintenance ───────────────────────────────────────────────────────────

    #[test]
    fn test_mark_maintenance_reachable_from_every_state() {
        for from in [Available, Reserved, Occupied, Maintenance] {
            assert_eq!(from.apply(MarkMaintenance), Ok(Maintenance));
        }
    }

    #[test]
    fn test_maintenance_clears_only_to_available() {
        assert_eq!(Maintenance.apply(ClearMaintenance), Ok(Available));
    }

    #[test]
    fn test_check_in_on_maintenance_seat_is_rejected() {
        assert_eq!(
            Maintenance.apply(CheckIn),
            Err(InvalidTransitionError {
                from: Maintenance,
                event: CheckIn
            })
        );
    }

    #[test]
    fn test_maintenance_then_clear_then_check_in_succeeds() {
        let status = Occupied
            .apply(MarkMaintenance)
            .and_then(|s| s.apply(ClearMaintenance))
            .and_then(|s| s.apply(CheckIn));
        assert_eq!(status, Ok(Occupied));
    }

    // ── Rejected re-sends and off-table pairs ─────────────────────────────────

    #[test]
    fn test_double_check_in_is_rejected_not_deduplicated() {
        let occupied = Available.apply(CheckIn).unwrap();
        assert_eq!(
            occupied.apply(CheckIn),
            Err(InvalidTransitionError {
                from: Occupied,
                event: CheckIn
            })
        );
    }

    #[test]
    fn test_check_out_on_available_seat_is_rejected() {
        assert!(Available.apply(CheckOut).is_err());
    }

    #[test]
    fn test_reserve_on_occupied_seat_is_rejected() {
        assert!(Occupied.apply(Reserve).is_err());
    }

    #[test]
    fn test_cancel_reservation_on_available_seat_is_rejected() {
        assert!(Available.apply(CancelReservation).is_err());
    }

    #[test]
    fn test_clear_maintenance_outside_maintenance_is_rejected() {
        for from in [Available, Reserved, Occupied] {
            assert_eq!(
                from.apply(ClearMaintenance),
                Err(InvalidTransitionError {
                    from,
                    event: ClearMaintenance
                })
            );
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Available).unwrap(), "\"available\"");
        assert_eq!(serde_json::to_string(&Maintenance).unwrap(), "\"maintenance\"");
    }
}

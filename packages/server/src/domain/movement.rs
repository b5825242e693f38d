//! Movement validation.
//!
//! A move is legal iff it is exactly one orthogonal unit step and lands inside the grid.

use thiserror::Error;

use super::value_object::{Grid, Position};

/// Why a proposed move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("move by ({dx}, {dy}) is not a single orthogonal step")]
    NotUnitStep { dx: i64, dy: i64 },

    #[error("target {0} is outside the grid")]
    OutOfBounds(Position),
}

/// Result of a move request against the authoritative position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(Position),
    Rejected {
        current: Position,
        reason: MoveRejection,
    },
}

pub fn validate_move(grid: Grid, current: Position, proposed: Position) -> Result<(), MoveRejection> {
    // i64 so that extreme client-supplied coordinates cannot overflow
    let dx = i64::from(proposed.x) - i64::from(current.x);
    let dy = i64::from(proposed.y) - i64::from(current.y);

    let unit_step = (dx.abs() == 1 && dy == 0) || (dx == 0 && dy.abs() == 1);
    if !unit_step {
        return Err(MoveRejection::NotUnitStep { dx, dy });
    }
    if !grid.contains(proposed) {
        return Err(MoveRejection::OutOfBounds(proposed));
    }
    Ok(())
}

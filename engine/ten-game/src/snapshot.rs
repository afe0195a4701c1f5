//! Flat board snapshots, the exchange format between a client and the engine.
//!
//! A snapshot carries only what the client tracks: the 81 tile owners, the
//! prescribed big square, and whose turn it is. The derived fields (per-big-
//! square status and the win counters) are rebuilt on decode. The snapshot
//! is trusted to describe a reachable position; only the value ranges are
//! checked.

use thiserror::Error;

use crate::board::{Board, BLACK, WHITE};

/// Shape violations in a client snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("tile {index} holds {value}, expected -1, 0, or +1")]
    BadTile { index: usize, value: i8 },

    #[error("player identity {0} is not +1 or -1")]
    BadPlayer(i8),

    #[error("big square to pick {0} is outside -1..9")]
    BadBigSquare(i8),
}

/// A flat client-side board representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Tile owners, indexed `big * 9 + tile`.
    pub tiles: [i8; 81],
    /// Prescribed big square for the next move, or -1.
    pub big_to_pick: i8,
    /// Player to move: +1 or -1.
    pub to_move: i8,
}

impl Board {
    /// Rebuild a board from a client snapshot, recomputing big-square
    /// statuses and win counters.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Board, SnapshotError> {
        for (index, &value) in snapshot.tiles.iter().enumerate() {
            if !(-1..=1).contains(&value) {
                return Err(SnapshotError::BadTile { index, value });
            }
        }
        if snapshot.to_move != BLACK && snapshot.to_move != WHITE {
            return Err(SnapshotError::BadPlayer(snapshot.to_move));
        }
        if !(-1..9).contains(&snapshot.big_to_pick) {
            return Err(SnapshotError::BadBigSquare(snapshot.big_to_pick));
        }
        Ok(Board::from_parts(
            snapshot.tiles,
            snapshot.big_to_pick,
            snapshot.to_move,
        ))
    }

    /// Flatten this board back into the client representation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: *self.tiles(),
            big_to_pick: self.big_to_pick(),
            to_move: self.current_player(),
        }
    }
}

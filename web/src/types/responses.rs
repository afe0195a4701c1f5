//! Response types for the web API.

use serde::{Deserialize, Serialize};

/// Placeholder move sent when the server has no move to report.
pub const PLACEHOLDER_MOVE: [i32; 2] = [-1, -1];

/// Status code reported to the client for an illegal human move.
pub const STATUS_ILLEGAL_MOVE: i8 = 2;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// AI reply for a plain board snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// The chosen `[big, tile]` move.
    #[serde(rename = "move")]
    pub mv: [i32; 2],
    /// Winning probability of the chosen move, 0..100.
    pub winning_percentage: u8,
    /// Playouts performed for this decision.
    pub simulation_counter: u64,
}

/// Reply for the client-move flow.
///
/// `status` carries the game status after the server's move (±1 decided, 0
/// in progress), or [`STATUS_ILLEGAL_MOVE`] when the human move was
/// rejected.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub ai_move: [i32; 2],
    pub big_square_to_pick: i8,
    pub status: i8,
    pub ai_winning_probability: u8,
}

impl GameResponse {
    /// The standard reply to an illegal human move.
    pub fn illegal_move() -> Self {
        Self {
            ai_move: PLACEHOLDER_MOVE,
            big_square_to_pick: -1,
            status: STATUS_ILLEGAL_MOVE,
            ai_winning_probability: 0,
        }
    }

    /// The reply when `winner` decided the game before the AI could move.
    pub fn winner(winner: i8) -> Self {
        Self {
            ai_move: PLACEHOLDER_MOVE,
            big_square_to_pick: -1,
            status: winner,
            ai_winning_probability: 0,
        }
    }
}

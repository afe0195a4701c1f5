//! Request types for the web API.

use serde::Deserialize;

/// A board snapshot as the client tracks it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPayload {
    /// Tile owners indexed `big * 9 + tile`: -1, 0, +1. Must hold 81 values.
    pub tiles: Vec<i8>,
    /// Big square the next move is confined to, or -1 for a free choice.
    pub big_square_to_pick: i8,
    /// Player to move: +1 or -1.
    pub player_identity: i8,
}

/// The full client-move flow: the position before the human move, plus the
/// move itself. The server validates the move, answers for a finished game,
/// or responds with its own move.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub board_before_human_move: BoardPayload,
    /// `[big, tile]` of the human move.
    pub human_move: [i8; 2],
}

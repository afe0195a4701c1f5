//! Move-request handlers: the adapter between the JSON boundary and the
//! search engine.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, info};

use ten_game::{Board, Move, Snapshot};
use ten_mcts::{select_move, SearchConfig, SearchError, SearchResult};

use crate::types::{BoardPayload, GameResponse, MoveResponse, PlayRequest};
use crate::AppState;

fn bad_request(reason: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, reason.into())
}

/// Rebuild a board from the wire payload, mapping shape violations to 400.
fn decode_board(payload: &BoardPayload) -> Result<Board, (StatusCode, String)> {
    let tiles: [i8; 81] = payload
        .tiles
        .as_slice()
        .try_into()
        .map_err(|_| bad_request(format!("expected 81 tiles, got {}", payload.tiles.len())))?;
    Board::from_snapshot(&Snapshot {
        tiles,
        big_to_pick: payload.big_square_to_pick,
        to_move: payload.player_identity,
    })
    .map_err(|err| bad_request(err.to_string()))
}

/// Run the engine off the async runtime and map its failures to HTTP codes.
async fn run_search(
    board: Board,
    config: SearchConfig,
) -> Result<SearchResult, (StatusCode, String)> {
    let outcome = tokio::task::spawn_blocking(move || select_move(&board, config))
        .await
        .map_err(|err| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("search task failed: {err}"),
            )
        })?;
    outcome.map_err(|err| match err {
        SearchError::NoLegalMoves => (
            StatusCode::CONFLICT,
            "the position is already decided".to_string(),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("search failed: {other}"),
        ),
    })
}

/// AI move for a raw board snapshot.
pub async fn ai_move(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BoardPayload>, JsonRejection>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    let Json(payload) = payload
        .map_err(|rejection| bad_request(format!("invalid request: {}", rejection.body_text())))?;
    let board = decode_board(&payload)?;

    let config = SearchConfig::default().with_time_budget(state.think_time);
    let result = run_search(board, config).await?;

    info!(
        big = result.best_move.big,
        tile = result.best_move.tile,
        winning_percentage = result.winning_percentage,
        simulations = result.simulations,
        "served AI move"
    );
    Ok(Json(MoveResponse {
        mv: [i32::from(result.best_move.big), i32::from(result.best_move.tile)],
        winning_percentage: result.winning_percentage,
        simulation_counter: result.simulations,
    }))
}

/// The full client-move flow: validate the human move, answer for a decided
/// game, or reply with the engine's move.
pub async fn play(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, (StatusCode, String)> {
    let Json(payload) = payload
        .map_err(|rejection| bad_request(format!("invalid request: {}", rejection.body_text())))?;
    let board = decode_board(&payload.board_before_human_move)?;

    let [big, tile] = payload.human_move;
    if big < 0 || tile < 0 {
        debug!(big, tile, "rejected out-of-range client move");
        return Ok(Json(GameResponse::illegal_move()));
    }
    let mv = Move {
        big: big as u8,
        tile: tile as u8,
    };
    let Some(after_human) = board.try_apply(mv) else {
        debug!(?mv, "rejected illegal client move");
        return Ok(Json(GameResponse::illegal_move()));
    };

    let status = after_human.game_status();
    if status != 0 {
        info!(winner = status, "game decided by the client move");
        return Ok(Json(GameResponse::winner(status)));
    }

    let config = SearchConfig::default().with_time_budget(state.think_time);
    let result = run_search(after_human.clone(), config).await?;
    let after_ai = after_human.apply(result.best_move);

    Ok(Json(GameResponse {
        ai_move: [i32::from(result.best_move.big), i32::from(result.best_move.tile)],
        big_square_to_pick: after_ai.big_to_pick(),
        status: after_ai.game_status(),
        ai_winning_probability: result.winning_percentage,
    }))
}

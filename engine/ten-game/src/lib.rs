//! Rules engine for the board game TEN, a nine-board tic-tac-toe variant.
//!
//! TEN is played on nine 3×3 *big squares*, each holding nine *tiles*. A move
//! in tile `b` of some big square sends the opponent into big square `b` for
//! their next move, unless that big square is already decided, in which case
//! the choice is free. Winning three big squares in a row wins the game
//! outright; if every big square is decided without a three-in-a-row, the
//! side holding more big squares wins.
//!
//! The crate provides the [`Board`] value type with legal-move enumeration,
//! functional move application, and terminal detection, plus a [`Snapshot`]
//! codec for rebuilding a board from a flat client representation. It is
//! deliberately free of I/O and logging: these primitives sit on the hot path
//! of Monte Carlo playouts and are called millions of times per decision.
//!
//! # Usage
//!
//! ```rust
//! use ten_game::{Board, Move};
//!
//! let board = Board::new();
//! assert_eq!(board.legal_moves().len(), 81);
//!
//! let board = board.apply(Move { big: 4, tile: 4 });
//! // The reply is forced into big square 4.
//! assert_eq!(board.big_to_pick(), 4);
//! ```

mod board;
mod snapshot;

pub use board::{Board, Move, BLACK, WHITE};
pub use snapshot::{Snapshot, SnapshotError};

//! Monte Carlo tree search engine for TEN.
//!
//! The engine repeats the classic four MCTS phases under a wall-clock
//! deadline:
//!
//! 1. **Selection**: descend from the root by UCB1, flipping the player
//!    perspective at every ply, until a childless node is reached
//! 2. **Expansion**: enumerate the legal moves of the selected node and
//!    fan one apply-plus-playout job per move out to a fixed worker pool
//! 3. **Simulation**: each worker plays its move and rolls the position out
//!    with uniformly random moves to a terminal state
//! 4. **Backpropagation**: the batch result is folded into every ancestor
//!    up to the root in one aggregated pass
//!
//! The tree is owned by the dispatching thread; workers only ever touch
//! private board copies, so no locking is needed anywhere. Boards are small
//! fixed-size values and cheap to copy.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use ten_game::Board;
//! use ten_mcts::{select_move, SearchConfig};
//!
//! let board = Board::new();
//! let config = SearchConfig::default().with_time_budget(Duration::from_millis(200));
//! let result = select_move(&board, config).unwrap();
//! println!("{:?} at {}%", result.best_move, result.winning_percentage);
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use search::{select_move, SearchError, SearchResult, Searcher};
pub use tree::SearchTree;

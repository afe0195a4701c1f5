//! The search loop: selection, parallel expansion, backpropagation, and the
//! final move choice.
//!
//! The dispatcher thread owns the tree outright. Each iteration it selects a
//! frontier node alone, fans the per-move playout jobs out to the worker
//! pool, waits for the whole batch, then attaches the finished children and
//! backpropagates alone. Nothing outside the batch runs concurrently, so the
//! tree needs no synchronization.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use ten_game::{Board, Move};

use crate::config::SearchConfig;
use crate::node::NodeId;
use crate::tree::SearchTree;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal moves: the position is already decided")]
    NoLegalMoves,

    #[error("failed to build the worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid search state: {0}")]
    InvalidState(String),
}

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The move with the highest win ratio at the root.
    pub best_move: Move,

    /// That subtree's win ratio as a truncated whole percentage.
    pub winning_percentage: u8,

    /// Playouts performed within the budget.
    pub simulations: u64,
}

/// One search over one position. The tree is ephemeral: nothing is carried
/// over to the next decision.
pub struct Searcher {
    tree: SearchTree,
    /// `to_move` at the root; playouts score 1 when this side wins.
    root_player: i8,
    config: SearchConfig,
    pool: rayon::ThreadPool,
}

impl Searcher {
    pub fn new(board: Board, config: SearchConfig) -> Result<Self, SearchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;
        Ok(Self {
            root_player: board.current_player(),
            tree: SearchTree::new(board),
            config,
            pool,
        })
    }

    /// Run the deadline loop and pick the best root child.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        let root = self.tree.root();
        if let Some(board) = self.tree.get(root).board.as_ref() {
            if board.game_status() != 0 {
                return Err(SearchError::NoLegalMoves);
            }
        }

        let simulations = self.think()?;

        let best = self.tree.best_child().ok_or(SearchError::NoLegalMoves)?;
        let node = self.tree.get(best);
        let best_move = node
            .mv
            .ok_or_else(|| SearchError::InvalidState("root child without a move".into()))?;
        Ok(SearchResult {
            best_move,
            winning_percentage: node.winning_percentage(),
            simulations,
        })
    }

    /// Selection → expansion → backpropagation until the wall clock runs
    /// out. The deadline is checked only between iterations; an in-flight
    /// batch always completes.
    fn think(&mut self) -> Result<u64, SearchError> {
        let started = Instant::now();
        let mut simulations = 0u64;
        while started.elapsed() < self.config.time_budget {
            let leaf = self.tree.select_leaf(self.config.exploration);
            simulations += self.expand(leaf)?;
        }
        debug!(
            simulations,
            nodes = self.tree.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(simulations)
    }

    /// Expand `leaf`: one playout per legal move on the worker pool, then a
    /// single aggregated backpropagation. Returns the number of playouts.
    fn expand(&mut self, leaf: NodeId) -> Result<u64, SearchError> {
        let board = self
            .tree
            .get_mut(leaf)
            .board
            .take()
            .ok_or_else(|| SearchError::InvalidState("selected node has no cached board".into()))?;

        let moves = board.legal_moves();
        if moves.is_empty() {
            // Terminal node: score it directly, one visit, and keep its
            // board so later selections can re-score it.
            let win = u32::from(board.game_status() == self.root_player);
            self.tree.get_mut(leaf).board = Some(board);
            self.tree.backpropagate(leaf, win, 1);
            return Ok(1);
        }

        // The interior board is no longer needed once its children exist;
        // dropping it caps tree memory at the frontier.
        let root_player = self.root_player;
        let results: Vec<(Move, Board, u32)> = self.pool.install(|| {
            moves
                .par_iter()
                .map_init(SmallRng::from_entropy, |rng, &mv| {
                    let child = board.apply(mv);
                    let win = random_playout(&child, root_player, rng);
                    (mv, child, win)
                })
                .collect()
        });

        let batch = results.len() as u32;
        let wins: u32 = results.iter().map(|(_, _, win)| win).sum();
        for (mv, child_board, win) in results {
            self.tree.add_child(leaf, mv, child_board, win);
        }
        self.tree.backpropagate(leaf, wins, batch);
        trace!(batch, wins, "expanded frontier node");
        Ok(u64::from(batch))
    }
}

/// Uniformly random rollout from `start` to a terminal position. Scores 1
/// when the rollout ends in the root player's favor, 0 otherwise; the
/// big-square tiebreak rules out draws.
fn random_playout(start: &Board, root_player: i8, rng: &mut SmallRng) -> u32 {
    let mut board = start.clone();
    let mut status = board.game_status();
    while status == 0 {
        let moves = board.legal_moves();
        board = board.apply(moves[rng.gen_range(0..moves.len())]);
        status = board.game_status();
    }
    u32::from(status == root_player)
}

/// Search `board` under `config` and return the chosen move with its
/// statistics. The sole engine entry point.
pub fn select_move(board: &Board, config: SearchConfig) -> Result<SearchResult, SearchError> {
    let mut searcher = Searcher::new(board.clone(), config)?;
    searcher.run()
}

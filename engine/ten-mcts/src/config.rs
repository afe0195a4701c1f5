//! Search configuration.

use std::time::Duration;

/// Worker-pool size: half the available cores, at least one. Playouts are
/// compute-bound, and leaving headroom keeps the dispatcher and the serving
/// process responsive.
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores / 2).max(1)
}

/// Configuration for one Monte Carlo tree search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget for the deadline loop. Checked between iterations
    /// only, so an in-flight batch may overrun it by one batch duration.
    pub time_budget: Duration,

    /// Exploration constant of the UCB1 formula. 1.0 balances exploitation
    /// against exploration of rarely-visited children.
    pub exploration: f64,

    /// Number of playout workers in the fixed pool.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(1500),
            exploration: 1.0,
            workers: default_workers(),
        }
    }
}

impl SearchConfig {
    /// A fast configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_millis(50),
            exploration: 1.0,
            workers: 2,
        }
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builder pattern: set the worker-pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

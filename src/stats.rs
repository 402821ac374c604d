//! Statistics collected during a search

use std::time::Duration;

/// Statistics collected during a search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of completed iterations
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached by selection and expansion
    pub max_depth: usize,

    /// Total number of moves played during rollouts
    pub rollout_plies: usize,

    /// Sum of the root side's rollout outcomes
    pub total_outcome: f64,

    /// Whether the search was stopped by the time budget
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::ZERO,
            tree_size: 1, // root
            max_depth: 0,
            rollout_plies: 0,
            total_outcome: 0.0,
            stopped_early: false,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns the average number of moves per rollout
    pub fn avg_rollout_length(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.rollout_plies as f64 / self.iterations as f64
    }

    /// Returns the share of iterations the root side won
    pub fn win_rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_outcome / self.iterations as f64
    }

    /// Returns a one-line summary suitable for logging
    pub fn summary(&self) -> String {
        format!(
            "iterations={} time={:.3}s tree={} depth={} avg_iter={:.1}us iter/s={:.1} rollout={:.1} win_rate={:.3} stopped_early={}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.avg_rollout_length(),
            self.win_rate(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration for the planner and for the simulated rules
//!
//! Both structs are plain values handed to their owners at construction.
//! Nothing reads settings from the environment.

use std::time::Duration;

use crate::{MCTSError, Result};

/// Criteria for selecting the root action after search is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the highest accumulated score
    ///
    /// This is the default.
    HighestScore,

    /// Select the child with the most visits
    MostVisits,

    /// Select the child with the highest average score
    ///
    /// Can favor children that were visited only a handful of times.
    HighestValue,
}

/// Configuration for the MCTS planner
///
/// # Example
///
/// ```
/// use photosynthesis_mcts::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_iterations(10_000)
///     .with_max_time(Duration::from_millis(90))
///     .with_best_child_criteria(BestChildCriteria::MostVisits)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `C` of the UCT formula, sqrt(2) by default
    pub exploration_constant: f64,

    /// Maximum number of iterations to run
    pub max_iterations: usize,

    /// Wall-clock budget; the search stops at whichever budget runs out first
    pub max_time: Option<Duration>,

    /// Nodes at this depth are rolled out instead of expanded
    pub max_depth: Option<usize>,

    /// Seed for the search's random number generator
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,

    /// Criteria for selecting the root action
    pub best_child_criteria: BestChildCriteria,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 10_000,
            max_time: None,
            max_depth: None,
            seed: None,
            best_child_criteria: BestChildCriteria::HighestScore,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the maximum number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the maximum depth to expand
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets a fixed random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be a non-negative number, got {}",
                self.exploration_constant
            )));
        }
        if self.max_iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(MCTSError::InvalidConfiguration(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How players earn sun when a day ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunIncome {
    /// Every tree yields its size
    Flat,

    /// Only trees outside any shadow yield their size
    Shadowed,
}

/// Rule and action-gating settings for simulated games
///
/// # Example
///
/// ```
/// use photosynthesis_mcts::config::{RulesConfig, SunIncome};
///
/// let rules = RulesConfig::default()
///     .with_harvest_from_day(15)
///     .with_sun_income(SunIncome::Shadowed);
/// assert_eq!(rules.harvest_from_day, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// First day on which COMPLETE is offered regardless of tree count
    pub harvest_from_day: u8,

    /// COMPLETE is also offered once a player owns this many size-3 trees
    pub harvest_tree_threshold: usize,

    /// Sun income rule applied at the end of each day
    pub sun_income: SunIncome,

    /// Last day (exclusive) on which the seed strategy plants
    pub seed_until_day: u8,

    /// Number of days the grow strategy projects sun income over
    pub sun_horizon: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            harvest_from_day: 12,
            harvest_tree_threshold: 4,
            sun_income: SunIncome::Flat,
            seed_until_day: 20,
            sun_horizon: 6,
        }
    }
}

impl RulesConfig {
    /// Sets the first day on which harvesting is always offered
    pub fn with_harvest_from_day(mut self, day: u8) -> Self {
        self.harvest_from_day = day;
        self
    }

    /// Sets the size-3 tree count that unlocks harvesting early
    pub fn with_harvest_tree_threshold(mut self, threshold: usize) -> Self {
        self.harvest_tree_threshold = threshold;
        self
    }

    /// Sets the sun income rule
    pub fn with_sun_income(mut self, income: SunIncome) -> Self {
        self.sun_income = income;
        self
    }

    /// Sets the last day on which the seed strategy plants
    pub fn with_seed_until_day(mut self, day: u8) -> Self {
        self.seed_until_day = day;
        self
    }

    /// Sets the sun projection horizon used by the grow strategy
    pub fn with_sun_horizon(mut self, days: u8) -> Self {
        self.sun_horizon = days;
        self
    }
}

//! The search loop: selection, expansion, rollout and backpropagation
//!
//! Every iteration runs to completion before the next one starts, so stopping
//! on a budget never leaves the tree half updated.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::{GameState, Move},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCTPolicy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, NodePath},
    MCTSError, Result,
};

/// Monte Carlo Tree Search over a [`GameState`]
///
/// The root side is the side to move in the initial state; every outcome is
/// measured from its point of view.
pub struct MCTS<S: GameState> {
    /// Root node of the search tree
    pub root: MCTSNode<S>,

    root_player: S::Player,

    config: MCTSConfig,

    statistics: SearchStatistics,

    selection_policy: Box<dyn SelectionPolicy<S>>,

    simulation_policy: Box<dyn SimulationPolicy<S>>,

    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,

    rng: StdRng,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a planner rooted at `initial_state`
    pub fn new(initial_state: S, config: MCTSConfig) -> Self {
        let root = MCTSNode::new(initial_state, None, None, 0);
        let root_player = root.player;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MCTS {
            root,
            root_player,
            selection_policy: Box::new(UCTPolicy::new(config.exploration_constant)),
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy: Box::new(StandardPolicy::new()),
            config,
            statistics: SearchStatistics::new(),
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the rollout policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Replaces the root with a new state, dropping the previous tree
    pub fn reset_root(&mut self, state: S) {
        self.root = MCTSNode::new(state, None, None, 0);
        self.root_player = self.root.player;
        self.statistics = SearchStatistics::new();
    }

    /// Returns the side the search plays for
    pub fn root_player(&self) -> S::Player {
        self.root_player
    }

    /// Runs the search within the configured budgets and returns the best move
    pub fn search(&mut self) -> Result<S::Move> {
        self.search_for_iterations(self.config.max_iterations)
    }

    /// Runs the search until `duration` has elapsed
    ///
    /// The configured iteration budget is ignored for this call.
    pub fn search_for_time(&mut self, duration: Duration) -> Result<S::Move> {
        let previous = self.config.max_time.replace(duration);
        let result = self.search_for_iterations(usize::MAX);
        self.config.max_time = previous;
        result
    }

    /// Runs at most `iterations` iterations, still honoring the time budget
    ///
    /// The tree is rebuilt from scratch. A terminal root is not searched and
    /// yields [`MCTSError::GameOver`] with the final outcome.
    pub fn search_for_iterations(&mut self, iterations: usize) -> Result<S::Move> {
        self.config.validate()?;

        if self.root.state.is_terminal() {
            let outcome = self.root.state.outcome(self.root_player);
            debug!("root state is terminal, outcome {}", outcome);
            return Err(MCTSError::GameOver { outcome });
        }

        self.root.children.clear();
        self.root.visits = 0;
        self.root.total_score = 0.0;
        self.statistics = SearchStatistics::new();

        let start_time = Instant::now();
        let max_time = self.config.max_time;

        for _ in 0..iterations {
            if let Some(max_duration) = max_time {
                if start_time.elapsed() >= max_duration {
                    self.statistics.stopped_early = true;
                    debug!(
                        "time budget of {:?} reached after {} iterations",
                        max_duration, self.statistics.iterations
                    );
                    break;
                }
            }

            self.execute_iteration()?;
            self.statistics.iterations += 1;
        }

        self.statistics.total_time = start_time.elapsed();
        debug!("search finished: {}", self.statistics.summary());

        self.select_best_action()
    }

    fn execute_iteration(&mut self) -> Result<()> {
        let mut path = self.selection();
        self.expansion(&mut path)?;
        let outcome = self.simulation(&path)?;
        self.backpropagation(&path, outcome);
        Ok(())
    }

    /// Descends from the root to a leaf
    fn selection(&mut self) -> NodePath {
        let mut path = NodePath::new();
        let mut current = &self.root;

        while !current.is_leaf() {
            let index = self.selection_policy.select_child(current);
            path.push(index);
            current = &current.children[index];
        }

        self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        path
    }

    /// Expands the leaf at the end of `path` and extends the path into the
    /// child chosen for the rollout
    ///
    /// Terminal leaves and leaves at the depth limit are left as they are.
    fn expansion(&mut self, path: &mut NodePath) -> Result<()> {
        let mut node = &mut self.root;
        for &index in &path.indices {
            node = &mut node.children[index];
        }

        if node.state.is_terminal() {
            return Ok(());
        }
        if let Some(limit) = self.config.max_depth {
            if node.depth >= limit {
                return Ok(());
            }
        }

        let created = node.expand()?;
        if created == 0 {
            return Err(MCTSError::NoLegalActions);
        }
        self.statistics.tree_size += created;

        let index = self.selection_policy.select_child(node);
        path.push(index);
        self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        Ok(())
    }

    /// Plays the node at the end of `path` out and returns the root side's
    /// outcome
    fn simulation(&mut self, path: &NodePath) -> Result<f64> {
        let node = Self::node_at(&self.root, path);

        if node.state.is_terminal() {
            return Ok(node.state.outcome(self.root_player));
        }

        let (outcome, plies) = self
            .simulation_policy
            .simulate(&node.state, self.root_player, &mut self.rng)?;
        self.statistics.rollout_plies += plies;
        Ok(outcome)
    }

    /// Credits the outcome to every node on the path below the root
    ///
    /// The root only counts the iteration, which serves as the parent visit
    /// count of its children.
    fn backpropagation(&mut self, path: &NodePath, outcome: f64) {
        self.root.visits += 1;
        self.statistics.total_outcome += outcome;

        let mut node = &mut self.root;
        for &index in &path.indices {
            node = &mut node.children[index];
            self.backpropagation_policy
                .update_stats(node, outcome, self.root_player);
        }
    }

    fn node_at<'a>(root: &'a MCTSNode<S>, path: &NodePath) -> &'a MCTSNode<S> {
        let mut node = root;
        for &index in &path.indices {
            node = &node.children[index];
        }
        node
    }

    /// Picks the root move according to the configured criteria
    ///
    /// Ties go to the child with more visits, then to the preferred move,
    /// then to the earlier child. With no completed iteration the first legal
    /// move is returned.
    fn select_best_action(&self) -> Result<S::Move> {
        let criteria = self.config.best_child_criteria;
        let key = |child: &MCTSNode<S>| -> f64 {
            match criteria {
                BestChildCriteria::HighestScore => child.total_score(),
                BestChildCriteria::MostVisits => child.visits() as f64,
                BestChildCriteria::HighestValue => child.value(),
            }
        };

        let mut best: Option<&MCTSNode<S>> = None;
        for child in &self.root.children {
            trace!(
                "root child {:?}: visits {} score {:.1}",
                child.action,
                child.visits(),
                child.total_score()
            );
            let better = match best {
                None => true,
                Some(current) => {
                    let ordering = key(child)
                        .partial_cmp(&key(current))
                        .unwrap_or(Ordering::Equal)
                        .then(child.visits().cmp(&current.visits()))
                        .then(preference(child).cmp(&preference(current)));
                    ordering == Ordering::Greater
                }
            };
            if better {
                best = Some(child);
            }
        }

        match best.and_then(|child| child.action.clone()) {
            Some(action) => Ok(action),
            None => self
                .root
                .state
                .legal_moves()
                .into_iter()
                .next()
                .ok_or(MCTSError::NoLegalActions),
        }
    }

    /// Returns each root move with its visit count and accumulated score
    pub fn child_statistics(&self) -> Vec<(S::Move, u64, f64)> {
        self.root
            .children
            .iter()
            .filter_map(|child| {
                child
                    .action
                    .clone()
                    .map(|action| (action, child.visits(), child.total_score()))
            })
            .collect()
    }

    /// Returns the sum of the visit counts of the root's children
    pub fn root_children_visits(&self) -> u64 {
        self.root.children.iter().map(MCTSNode::visits).sum()
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Renders the tree down to `max_depth` levels below the root
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        let mut result = String::new();
        Self::visualize_node(&self.root, max_depth, &mut result);
        result
    }

    fn visualize_node(node: &MCTSNode<S>, max_depth: usize, output: &mut String) {
        let indent = "  ".repeat(node.depth);
        let action_str = match &node.action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, score: {:.1}, value: {:.3})\n",
            indent,
            action_str,
            node.visits(),
            node.total_score(),
            node.value()
        ));

        if node.depth < max_depth {
            for child in &node.children {
                Self::visualize_node(child, max_depth, output);
            }
        }
    }
}

fn preference<S: GameState>(node: &MCTSNode<S>) -> u8 {
    node.action.as_ref().map_or(0, Move::preference)
}

//! Numeric helpers for the UCT formula

/// Average score of a node, 0.0 when unvisited
pub fn exploitation_term(total_score: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    total_score / visits as f64
}

/// Exploration bonus `C * sqrt(ln(parent_visits) / visits)`
///
/// Unvisited nodes get an infinite bonus. A parent with no recorded visits
/// contributes no bonus rather than a NaN.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    if parent_visits == 0 {
        return 0.0;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// UCT value of a child node
pub fn ucb1_value(
    total_score: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploitation_term(total_score, visits)
        + exploration_term(parent_visits, visits, exploration_constant)
}

use photosynthesis_mcts::{
    policy::backpropagation::{AdversarialPolicy, BackpropagationPolicy, StandardPolicy},
    tree::MCTSNode,
    GameState, Move, Player,
};

/// Simple game state for testing
#[derive(Clone, Debug)]
struct TestGameState {
    player: TestPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TestPlayer(u8);

impl Player for TestPlayer {}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestMove(u8);

impl Move for TestMove {}

impl GameState for TestGameState {
    type Move = TestMove;
    type Player = TestPlayer;

    fn legal_moves(&self) -> Vec<Self::Move> {
        vec![TestMove(0)]
    }

    fn apply_move(&self, _mv: &Self::Move) -> photosynthesis_mcts::Result<Self> {
        Ok(self.clone())
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn outcome(&self, _for_player: Self::Player) -> f64 {
        0.0
    }

    fn current_player(&self) -> Self::Player {
        self.player
    }
}

fn node_played_by(player: u8) -> MCTSNode<TestGameState> {
    let state = TestGameState {
        player: TestPlayer(1),
    };
    MCTSNode::new(state, Some(TestMove(0)), Some(TestPlayer(player)), 1)
}

#[test]
fn test_standard_policy() {
    let mut node = node_played_by(1);
    let policy = StandardPolicy::new();

    // Initial state
    assert_eq!(node.visits(), 0);
    assert_eq!(node.total_score(), 0.0);

    policy.update_stats(&mut node, 1.0, TestPlayer(1));
    assert_eq!(node.visits(), 1);
    assert_eq!(node.total_score(), 1.0);

    policy.update_stats(&mut node, 0.0, TestPlayer(1));
    assert_eq!(node.visits(), 2);
    assert_eq!(node.total_score(), 1.0);
    assert_eq!(node.value(), 0.5);
}

#[test]
fn test_standard_policy_ignores_mover() {
    // Opponent nodes are credited with the root side's outcome too
    let mut node = node_played_by(2);
    StandardPolicy::new().update_stats(&mut node, 1.0, TestPlayer(1));

    assert_eq!(node.total_score(), 1.0);
}

#[test]
fn test_adversarial_policy() {
    let policy = AdversarialPolicy::new();

    let mut mine = node_played_by(1);
    let mut theirs = node_played_by(2);

    policy.update_stats(&mut mine, 1.0, TestPlayer(1));
    policy.update_stats(&mut theirs, 1.0, TestPlayer(1));

    assert_eq!(mine.total_score(), 1.0);
    assert_eq!(theirs.total_score(), 0.0);
    assert_eq!(theirs.visits(), 1);

    policy.update_stats(&mut theirs, 0.0, TestPlayer(1));
    assert_eq!(theirs.total_score(), 1.0);
}

#[test]
fn test_backpropagation_policy_cloning() {
    let boxed: Box<dyn BackpropagationPolicy<TestGameState>> = Box::new(AdversarialPolicy::new());
    let cloned = boxed.clone_box();

    let mut node = node_played_by(2);
    cloned.update_stats(&mut node, 1.0, TestPlayer(1));
    assert_eq!(node.total_score(), 0.0);
}

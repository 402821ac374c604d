use photosynthesis_mcts::{GameState, MCTSConfig, Move, Player, MCTS};

// Simple game state for testing visualization
#[derive(Clone, Debug)]
struct TestGame {
    depth: usize,
    max_depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestMove(usize);

impl Move for TestMove {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TestPlayer(usize);

impl Player for TestPlayer {}

impl GameState for TestGame {
    type Move = TestMove;
    type Player = TestPlayer;

    fn legal_moves(&self) -> Vec<Self::Move> {
        if self.depth >= self.max_depth {
            vec![]
        } else {
            vec![TestMove(0), TestMove(1)]
        }
    }

    fn apply_move(&self, _mv: &Self::Move) -> photosynthesis_mcts::Result<Self> {
        Ok(Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    fn is_terminal(&self) -> bool {
        self.depth >= self.max_depth
    }

    fn outcome(&self, _for_player: Self::Player) -> f64 {
        0.5
    }

    fn current_player(&self) -> Self::Player {
        TestPlayer(self.depth % 2)
    }
}

#[test]
fn test_tree_visualization() {
    // Create a small, fixed-depth game
    let game = TestGame {
        depth: 0,
        max_depth: 2,
    };

    let config = MCTSConfig::default().with_max_iterations(20).with_seed(0);
    let mut mcts = MCTS::new(game, config);
    mcts.search().unwrap();

    let tree_vis = mcts.visualize_tree(5);

    assert!(tree_vis.starts_with("Root"));
    assert!(tree_vis.contains("visits:"));
    assert!(tree_vis.contains("value:"));

    // Should contain indented levels
    assert!(tree_vis.contains("  TestMove"));
    assert!(tree_vis.contains("    TestMove"));

    // Root, two children and four grandchildren
    assert_eq!(tree_vis.lines().count(), 7);
    assert_eq!(mcts.root.subtree_size(), 7);
}

#[test]
fn test_visualization_depth_limit() {
    let game = TestGame {
        depth: 0,
        max_depth: 3,
    };

    let mut mcts = MCTS::new(game, MCTSConfig::default().with_max_iterations(50).with_seed(0));
    mcts.search().unwrap();

    assert_eq!(mcts.visualize_tree(0).lines().count(), 1);
    assert_eq!(mcts.visualize_tree(1).lines().count(), 3);
}

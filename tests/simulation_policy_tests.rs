use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use photosynthesis_mcts::{
    policy::simulation::{RandomPolicy, SimulationPolicy, StrategyPolicy},
    Game, HexField, PlayerState, RulesConfig, Side, Strategy, Tree,
};

fn opening() -> Game {
    let mut game = Game::new(Arc::new(HexField::standard()), RulesConfig::default());
    for side in Side::BOTH {
        *game.player_mut(side) = PlayerState::new(2, 0);
    }
    game.place_tree(Tree::new(19, 1, Side::Me)).unwrap();
    game.place_tree(Tree::new(25, 1, Side::Me)).unwrap();
    game.place_tree(Tree::new(28, 1, Side::Opponent)).unwrap();
    game.place_tree(Tree::new(34, 1, Side::Opponent)).unwrap();
    game
}

/// Last day: my only move that wins is to harvest
fn last_day() -> Game {
    let mut game = Game::new(Arc::new(HexField::standard()), RulesConfig::default());
    game.day = 23;
    game.nutrients = 5;
    *game.player_mut(Side::Me) = PlayerState::new(4, 0);
    *game.player_mut(Side::Opponent) = PlayerState::new(0, 2);
    game.place_tree(Tree::new(0, 3, Side::Me)).unwrap();
    game
}

#[test]
fn test_random_policy_plays_to_the_end() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let (outcome, plies) = policy.simulate(&opening(), Side::Me, &mut rng).unwrap();
        assert!(outcome == 0.0 || outcome == 1.0);
        // At least two waits per day
        assert!(plies >= 48, "only {} plies", plies);
    }
}

#[test]
fn test_random_policy_is_reproducible() {
    let policy = RandomPolicy::new();
    let game = opening();

    let mut first = StdRng::seed_from_u64(11);
    let mut second = StdRng::seed_from_u64(11);
    for _ in 0..5 {
        assert_eq!(
            policy.simulate(&game, Side::Me, &mut first).unwrap(),
            policy.simulate(&game, Side::Me, &mut second).unwrap()
        );
    }
}

#[test]
fn test_outcomes_are_complementary_without_ties() {
    let policy = RandomPolicy::new();
    let game = last_day();

    // Whatever is played the scores end up different, so exactly one side wins
    for seed in 0..10 {
        let (mine, _) = policy
            .simulate(&game, Side::Me, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let (theirs, _) = policy
            .simulate(&game, Side::Opponent, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(mine + theirs, 1.0);
    }
}

#[test]
fn test_strategy_policy_harvests() {
    let policy = StrategyPolicy::new(Strategy::default());
    let mut rng = StdRng::seed_from_u64(3);

    let (outcome, plies) = policy.simulate(&last_day(), Side::Me, &mut rng).unwrap();
    assert_eq!(outcome, 1.0);
    // COMPLETE, then a wait from each side
    assert_eq!(plies, 3);
}

#[test]
fn test_strategy_policy_without_exploration_is_deterministic() {
    let policy = StrategyPolicy::default();
    let game = opening();

    let first = policy
        .simulate(&game, Side::Me, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let second = policy
        .simulate(&game, Side::Me, &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_strategy_policy_exploration_is_clamped() {
    let game = opening();
    let mut rng = StdRng::seed_from_u64(5);

    for probability in [-1.0, 0.3, 5.0, f64::NAN] {
        let policy = StrategyPolicy::default().with_exploration(probability);
        let (outcome, _) = policy.simulate(&game, Side::Me, &mut rng).unwrap();
        assert!(outcome == 0.0 || outcome == 1.0);
    }
}

#[test]
fn test_simulation_policy_cloning() {
    let boxed: Box<dyn SimulationPolicy<Game>> = Box::new(StrategyPolicy::default());
    let cloned = boxed.clone_box();

    let game = last_day();
    let (outcome, _) = cloned
        .simulate(&game, Side::Me, &mut StdRng::seed_from_u64(0))
        .unwrap();
    assert_eq!(outcome, 1.0);
}

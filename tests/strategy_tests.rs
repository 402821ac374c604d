use std::sync::Arc;

use photosynthesis_mcts::{
    strategy::Candidate, Action, Game, HexField, RulesConfig, Side, Strategy, Tree,
};

fn game_with(trees: &[Tree], sun: u32, day: u8) -> Game {
    let mut game = Game::new(Arc::new(HexField::standard()), RulesConfig::default());
    game.day = day;
    game.player_mut(Side::Me).sun = sun;
    for tree in trees {
        game.place_tree(*tree).unwrap();
    }
    game
}

#[test]
fn test_chop_prefers_rich_soil() {
    let game = game_with(
        &[Tree::new(19, 3, Side::Me), Tree::new(0, 3, Side::Me)],
        10,
        15,
    );

    assert!(Strategy::Chop.is_applicable(&game, Side::Me));
    assert_eq!(
        Strategy::Chop.best_action(&game, Side::Me).unwrap(),
        Some(Action::Complete { cell: 0 })
    );
}

#[test]
fn test_chop_counts_neighbors() {
    // Both cells are in the first ring; cell 1 is crowded by the opponent
    let game = game_with(
        &[
            Tree::new(1, 3, Side::Me),
            Tree::new(4, 3, Side::Me),
            Tree::new(7, 1, Side::Opponent),
            Tree::new(8, 1, Side::Opponent),
        ],
        10,
        15,
    );

    let chop = Strategy::Chop;
    assert_eq!(chop.score(&game, Side::Me, &Candidate::Tree(1)).unwrap(), 1);
    assert_eq!(chop.score(&game, Side::Me, &Candidate::Tree(4)).unwrap(), 3);
    assert_eq!(
        chop.best_action(&game, Side::Me).unwrap(),
        Some(Action::Complete { cell: 4 })
    );
}

#[test]
fn test_chop_needs_sun() {
    let game = game_with(&[Tree::new(0, 3, Side::Me)], 3, 15);

    assert!(!Strategy::Chop.is_applicable(&game, Side::Me));
    assert_eq!(Strategy::Chop.best_action(&game, Side::Me).unwrap(), None);
}

#[test]
fn test_grow_picks_the_best_projection() {
    let game = game_with(
        &[Tree::new(0, 1, Side::Me), Tree::new(19, 1, Side::Me)],
        10,
        2,
    );

    assert_eq!(
        Strategy::Grow.best_action(&game, Side::Me).unwrap(),
        Some(Action::Grow { cell: 0 })
    );
}

#[test]
fn test_grow_skips_trees_that_cannot_finish() {
    let game = game_with(&[Tree::new(0, 0, Side::Me)], 10, 22);

    assert!(Strategy::Grow.is_applicable(&game, Side::Me));
    assert!(Strategy::Grow.candidates(&game, Side::Me).is_empty());
    assert_eq!(Strategy::Grow.best_action(&game, Side::Me).unwrap(), None);
}

#[test]
fn test_seed_avoids_own_trees() {
    let game = game_with(&[Tree::new(0, 1, Side::Me)], 0, 3);

    let candidates = Strategy::Seed.candidates(&game, Side::Me);
    assert_eq!(candidates.len(), 6);

    // Every first-ring target is next to the source, so they all tie
    assert_eq!(
        Strategy::Seed.best_action(&game, Side::Me).unwrap(),
        Some(Action::Seed { source: 0, target: 1 })
    );
    assert_eq!(
        Strategy::Seed
            .score(&game, Side::Me, &Candidate::Plant { source: 0, target: 1 })
            .unwrap(),
        6 - 2 - 1
    );
}

#[test]
fn test_seed_stops_late_in_the_game() {
    let game = game_with(&[Tree::new(0, 1, Side::Me)], 0, 20);

    assert!(!Strategy::Seed.is_applicable(&game, Side::Me));
    assert_eq!(Strategy::Seed.best_action(&game, Side::Me).unwrap(), None);
}

#[test]
fn test_seed_only_when_free() {
    let game = game_with(
        &[Tree::new(0, 1, Side::Me), Tree::new(20, 0, Side::Me)],
        5,
        3,
    );

    assert!(!Strategy::Seed.is_applicable(&game, Side::Me));
}

#[test]
fn test_composite_falls_through_in_order() {
    let strategy = Strategy::default();

    let harvest = game_with(
        &[Tree::new(0, 3, Side::Me), Tree::new(7, 1, Side::Me)],
        10,
        15,
    );
    assert_eq!(
        strategy.action(&harvest, Side::Me).unwrap(),
        Action::Complete { cell: 0 }
    );

    let grow = game_with(&[Tree::new(7, 1, Side::Me)], 10, 5);
    assert_eq!(strategy.action(&grow, Side::Me).unwrap(), Action::Grow { cell: 7 });

    let seed = game_with(&[Tree::new(7, 1, Side::Me)], 0, 5);
    assert!(matches!(
        strategy.action(&seed, Side::Me).unwrap(),
        Action::Seed { source: 7, .. }
    ));
}

#[test]
fn test_nothing_to_do_means_wait() {
    let empty = game_with(&[], 10, 5);
    assert_eq!(Strategy::default().action(&empty, Side::Me).unwrap(), Action::Wait);

    let mut waiting = game_with(&[Tree::new(0, 1, Side::Me)], 10, 5);
    waiting.player_mut(Side::Me).waiting = true;
    assert!(!Strategy::default().is_applicable(&waiting, Side::Me));
    assert_eq!(Strategy::default().action(&waiting, Side::Me).unwrap(), Action::Wait);
}

#[test]
fn test_strategy_moves_are_legal() {
    let game = game_with(
        &[
            Tree::new(0, 2, Side::Me),
            Tree::new(8, 1, Side::Me),
            Tree::new(14, 3, Side::Opponent),
        ],
        6,
        4,
    );

    for strategy in [Strategy::Chop, Strategy::Grow, Strategy::Seed, Strategy::default()] {
        let action = strategy.action(&game, Side::Me).unwrap();
        assert!(game.actions(Side::Me).contains(&action));
        assert!(game.simulate(&action).is_ok());
    }
}

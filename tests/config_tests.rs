use photosynthesis_mcts::{
    config::{BestChildCriteria, RulesConfig, SunIncome},
    MCTSConfig, MCTSError,
};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    // Test that all builder methods correctly set their respective values
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_max_time(Duration::from_secs(30))
        .with_max_depth(20)
        .with_seed(99)
        .with_best_child_criteria(BestChildCriteria::HighestValue);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.max_iterations, 5000);
    assert_eq!(config.max_time, Some(Duration::from_secs(30)));
    assert_eq!(config.max_depth, Some(20));
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.best_child_criteria, BestChildCriteria::HighestValue);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    // Default exploration constant should be sqrt(2)
    assert!((config.exploration_constant - 1.414).abs() < 0.001);
    assert_eq!(config.max_iterations, 10_000);
    assert_eq!(config.max_time, None);
    assert_eq!(config.max_depth, None);
    assert_eq!(config.seed, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::HighestScore);
}

#[test]
fn test_config_validation() {
    let invalid = [
        MCTSConfig::default().with_exploration_constant(-1.0),
        MCTSConfig::default().with_exploration_constant(f64::NAN),
        MCTSConfig::default().with_max_iterations(0),
        MCTSConfig::default().with_max_depth(0),
    ];

    for config in invalid {
        assert!(matches!(
            config.validate(),
            Err(MCTSError::InvalidConfiguration(_))
        ));
    }

    // Pure exploitation is allowed
    assert!(MCTSConfig::default()
        .with_exploration_constant(0.0)
        .validate()
        .is_ok());
}

#[test]
fn test_rules_default_values() {
    let rules = RulesConfig::default();

    assert_eq!(rules.harvest_from_day, 12);
    assert_eq!(rules.harvest_tree_threshold, 4);
    assert_eq!(rules.sun_income, SunIncome::Flat);
    assert_eq!(rules.seed_until_day, 20);
    assert_eq!(rules.sun_horizon, 6);
}

#[test]
fn test_rules_builder_methods() {
    let rules = RulesConfig::default()
        .with_harvest_from_day(0)
        .with_harvest_tree_threshold(2)
        .with_sun_income(SunIncome::Shadowed)
        .with_seed_until_day(15)
        .with_sun_horizon(3);

    assert_eq!(rules.harvest_from_day, 0);
    assert_eq!(rules.harvest_tree_threshold, 2);
    assert_eq!(rules.sun_income, SunIncome::Shadowed);
    assert_eq!(rules.seed_until_day, 15);
    assert_eq!(rules.sun_horizon, 3);
}

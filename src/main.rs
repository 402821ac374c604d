//! Referee-facing bot: reads the board and turns from stdin and prints one
//! action per turn on stdout. Logs go to stderr.

use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use photosynthesis_mcts::{
    protocol::{read_field, read_turn, LineReader},
    Action, MCTSConfig, MCTSError, RulesConfig, Side, Strategy, MCTS,
};

/// Search budget for the first turn, which the referee allows more time for
const FIRST_TURN_BUDGET: Duration = Duration::from_millis(900);

/// Search budget for every later turn
const TURN_BUDGET: Duration = Duration::from_millis(85);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> photosynthesis_mcts::Result<()> {
    let stdin = io::stdin();
    let mut reader = LineReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let field = Arc::new(read_field(&mut reader)?);
    let rules = RulesConfig::default();
    let fallback = Strategy::default();

    let mut turn = 0usize;
    while let Some(game) = read_turn(&mut reader, Arc::clone(&field), rules)? {
        let budget = if turn == 0 {
            FIRST_TURN_BUDGET
        } else {
            TURN_BUDGET
        };
        let config = MCTSConfig::default()
            .with_max_iterations(usize::MAX)
            .with_max_time(budget);

        let mut mcts = MCTS::new(game.clone(), config);
        let action = match mcts.search() {
            Ok(action) => action,
            Err(MCTSError::GameOver { outcome }) => {
                info!("game already decided, outcome {}", outcome);
                Action::Wait
            }
            Err(e) => {
                warn!("search failed ({}), falling back to greedy strategy", e);
                fallback.action(&game, Side::Me)?
            }
        };

        info!(
            "day {} turn {}: {} [{}]",
            game.day,
            turn,
            action,
            mcts.get_statistics().summary()
        );
        writeln!(out, "{}", action)?;
        out.flush()?;
        turn += 1;
    }

    Ok(())
}

// Bot facade
//
// Binds the pure decision core to the Battlesnake API endpoints. The Bot
// holds only startup-time state (configuration and the debug log handle);
// every move request is answered from the incoming snapshot alone.

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::policy::{self, Decision, Phase};
use crate::profiler;
use crate::types::{Battlesnake, Board, Game};

pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "cardinal-snake",
            "color": "#006699",
            "head": "bwc-ski",
            "tail": "sharp",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START: {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER: {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision itself is CPU-bound and runs on the blocking thread
    /// pool so the request task never stalls the reactor. The decision is
    /// a pure function of the snapshot, the configuration, and the
    /// configured seed; nothing survives between calls.
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        let board_snapshot = board.clone();
        let you_snapshot = you.clone();
        let config = self.config.clone();

        let decision = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(config.policy.tie_break_seed);
            policy::decide(&board_snapshot, &you_snapshot, &config, &mut rng)
        })
        .await
        .unwrap_or_else(|e| {
            // A panicked decision task still must answer with a move
            error!("Decision task failed: {}", e);
            Decision {
                direction: self.config.policy.fallback_direction(),
                phase: Phase::Hungry,
            }
        });

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        let budget_ms = self.config.timing.effective_budget_ms();
        if elapsed_ms > budget_ms {
            warn!(
                "Turn {}: decision took {}ms, budget is {}ms",
                turn, elapsed_ms, budget_ms
            );
        }

        info!(
            "Turn {}: {} ({} phase, {}ms)",
            turn,
            decision.direction.as_str(),
            decision.phase.as_str(),
            elapsed_ms
        );

        if self.config.profiling.enabled && self.config.profiling.log_to_stderr {
            profiler::report(*turn, elapsed_ms);
        }

        self.debug_logger.log_move(*turn, board.clone(), decision);

        json!({ "move": decision.direction.as_str() })
    }
}

// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot is what the HTTP handlers talk to. All move logic lives in
// `engine`; this type owns the config, the shared random source and the
// debug logger.

use log::info;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine;
use crate::types::{Battlesnake, Board, Game, TurnSnapshot};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    /// Shared by every in-flight request; locked only for the length of one decision
    rng: Mutex<StdRng>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging off
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a new Bot that writes every decision to `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let rng = match config.engine.fallback_seed {
            Some(seed) => {
                info!("Seeding move fallback with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Bot {
            config,
            rng: Mutex::new(rng),
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, _game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();
        let snapshot = TurnSnapshot::new(*turn, board, you);

        let decision = {
            let mut rng = self.rng.lock();
            engine::evaluate(&snapshot, &mut *rng)
        };

        info!(
            "Turn {}: Chose {} ({:?}, safe: {:?}, time: {}us)",
            turn,
            decision.direction,
            decision.reason,
            decision
                .safe_directions()
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>(),
            start_time.elapsed().as_micros()
        );

        self.debug_logger.log_move(
            *turn,
            &you.id,
            board.clone(),
            decision.direction,
            decision.reason,
        );

        json!({ "move": decision.direction.as_str() })
    }
}

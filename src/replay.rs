// Replay module for checking logged decisions against the current engine
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the engine on each logged board
// 3. Compare logged vs replayed moves
// 4. Print a summary report
//
// Random-fallback turns can't be reproduced move-for-move, so they count
// as a match when the logged move is one of the replayed safe moves.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::engine::{self, Decision, DecisionReason};
use crate::types::{Board, Direction, TurnSnapshot};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub snake_id: String,
    pub chosen_move: Direction,
    pub reason: DecisionReason,
    pub board: Board,
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_reason: DecisionReason,
    pub replayed_move: Direction,
    pub replayed_reason: DecisionReason,
    pub replayed_safe: Vec<Direction>,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub deterministic_turns: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// `seed` feeds the per-turn random source used for fallback picks
    pub fn new(seed: u64, verbose: bool) -> Self {
        ReplayEngine { seed, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let entries = Self::parse_log(BufReader::new(file))?;
        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Parses JSONL from any reader, skipping blank lines
    pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<LogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Runs the engine on one logged board, with a random source derived
    /// from the replay seed and the turn number
    pub fn replay_turn(&self, board: &Board, snake_id: &str, turn: i32) -> Result<Decision, String> {
        let you = board
            .snakes
            .iter()
            .find(|s| s.id == snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", snake_id))?;

        let mut rng = StdRng::seed_from_u64(self.seed ^ turn as u64);
        Ok(engine::evaluate(&TurnSnapshot::new(turn, board, you), &mut rng))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let start_time = Instant::now();
        let decision = self.replay_turn(&entry.board, &entry.snake_id, entry.turn)?;
        let computation_time_us = start_time.elapsed().as_micros();

        let replayed_safe = decision.safe_directions();
        let matches = if entry.reason.is_deterministic() {
            entry.chosen_move == decision.direction
        } else {
            !decision.reason.is_deterministic() && replayed_safe.contains(&entry.chosen_move)
        };

        let result = ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            original_reason: entry.reason,
            replayed_move: decision.direction,
            replayed_reason: decision.reason,
            replayed_safe,
            matches,
            computation_time_us,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({:?})",
                    entry.turn, result.replayed_move, result.replayed_reason
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({:?}), Replayed: {} ({:?})",
                    entry.turn,
                    result.original_move,
                    result.original_reason,
                    result.replayed_move,
                    result.replayed_reason
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in parallel; each turn gets its own random source.
    /// Entries that fail to replay are logged and skipped.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let deterministic_turns = results
            .iter()
            .filter(|r| r.original_reason.is_deterministic())
            .count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            deterministic_turns,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Deterministic:  {}", stats.deterministic_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Decision Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({:?}) → {} ({:?}), safe now: {:?}",
                    result.turn,
                    result.original_move,
                    result.original_reason,
                    result.replayed_move,
                    result.replayed_reason,
                    result
                        .replayed_safe
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}

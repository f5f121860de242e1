// Replay module for re-running decisions from debug logs
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the decision engine on historical states
// 3. Compare recorded vs replayed moves
// 4. Generate a summary report
//
// Random fallback moves cannot be reproduced exactly, so a replay that lands
// on a different random move is still counted as consistent as long as the
// recorded move is one of the replayed safe moves.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::debug_logger::DebugLogEntry;
use crate::decision::{decide_move, Decision, MoveReason};
use crate::types::{Board, Direction};

/// Entries are read back in the format the debug logger writes them
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub replayed_reason: MoveReason,
    pub matches: bool,
    pub consistent: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub inconsistent: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine. `seed` drives the random fallback.
    pub fn new(seed: u64, verbose: bool) -> Self {
        ReplayEngine { seed, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-runs the decision engine for one snake on a recorded board
    pub fn replay_turn(&self, board: &Board, our_snake_id: &str, turn: u32) -> Result<Decision, String> {
        let our_snake = board
            .snake(our_snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", our_snake_id))?;

        // Seed per turn so a turn replays the same way regardless of which
        // other turns were replayed before it
        let mut rng = StdRng::seed_from_u64(self.seed ^ u64::from(turn));
        Ok(decide_move(board, our_snake, &mut rng))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let decision = self.replay_turn(&entry.board, &entry.you_id, entry.turn)?;
        let original_move = entry.chosen_move;
        let matches = original_move == decision.direction;
        let both_random = matches!(entry.reason, MoveReason::RandomSafe { .. })
            && matches!(decision.reason, MoveReason::RandomSafe { .. });
        let consistent = matches || (both_random && decision.safety.is_safe(original_move));

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move: decision.direction,
            replayed_reason: decision.reason,
            matches,
            consistent,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({})",
                    entry.turn, decision.direction, decision.reason
                );
            } else if consistent {
                info!(
                    "Turn {}: ~ RANDOM - Original: {}, Replayed: {} ({})",
                    entry.turn, original_move, decision.direction, decision.reason
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({}), Replayed: {} ({})",
                    entry.turn, original_move, entry.reason, decision.direction, decision.reason
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries, skipping the ones that cannot be replayed
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let inconsistent = results.iter().filter(|r| !r.consistent).count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            inconsistent,
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
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Inconsistent:   {}", stats.inconsistent);
        println!("═══════════════════════════════════════════════════════════\n");

        let inconsistent: Vec<_> = results.iter().filter(|r| !r.consistent).collect();
        if !inconsistent.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                DETAILED INCONSISTENCIES");
            println!("═══════════════════════════════════════════════════════════");

            for result in inconsistent {
                println!(
                    "Turn {}: {} → {} ({})",
                    result.turn, result.original_move, result.replayed_move, result.replayed_reason
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (turn, acceptable_moves)
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

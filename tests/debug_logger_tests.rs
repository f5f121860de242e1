// Integration tests for the JSONL debug logger
//
// Writes real decisions through the Bot and reads the file back
// with the replay loader.

use greedy_snake::bot::Bot;
use greedy_snake::config::Config;
use greedy_snake::debug_logger::DebugLogger;
use greedy_snake::decision::MoveReason;
use greedy_snake::replay::ReplayEngine;
use greedy_snake::types::{Battlesnake, Board, Coord, Direction, Game};
use std::collections::HashMap;
use std::path::PathBuf;

fn temp_log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("greedy_snake_{}_{}.jsonl", name, std::process::id()))
}

fn fixtures() -> (Game, Board, Battlesnake) {
    let me = Battlesnake {
        id: "me".to_string(),
        name: "me".to_string(),
        health: 80,
        body: vec![Coord { x: 5, y: 5 }, Coord { x: 5, y: 4 }],
        head: Coord { x: 5, y: 5 },
        length: 2,
        latency: "0".to_string(),
        shout: None,
    };
    let board = Board {
        height: 11,
        width: 11,
        food: vec![Coord { x: 8, y: 5 }],
        snakes: vec![me.clone()],
        hazards: vec![],
    };
    let game = Game {
        id: "logged-game".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: "test".to_string(),
    };
    (game, board, me)
}

#[tokio::test]
async fn test_enabled_logger_writes_replayable_entries() {
    let path = temp_log_path("enabled");
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    let bot = Bot::with_logger(Config::default_hardcoded(), logger.clone());
    let (game, board, me) = fixtures();

    for turn in 0..3 {
        let decision = bot.decide(&game, turn, &board, &me);
        assert_eq!(decision.direction, Direction::Right);
    }

    // Bot spawns its writes; push one more through the logger directly and
    // wait on it. The mutex serializes writes, so the earlier ones land first.
    let decision = bot.decide(&game, 3, &board, &me);
    let handle = logger
        .log_move(&game.id, 3, &me.id, &board, &decision)
        .expect("enabled logger returns a handle");
    handle.await.unwrap();

    let entries = ReplayEngine::new(0, false).load_log_file(&path).unwrap();
    assert!(entries.len() >= 4, "got {} entries", entries.len());

    let last = entries.last().unwrap();
    assert_eq!(last.game_id, "logged-game");
    assert_eq!(last.turn, 3);
    assert_eq!(last.you_id, "me");
    assert_eq!(last.chosen_move, Direction::Right);
    assert_eq!(
        last.reason,
        MoveReason::TowardFood {
            target: Coord { x: 8, y: 5 }
        }
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_disabled_logger_is_a_no_op() {
    let path = temp_log_path("disabled");
    let _ = std::fs::remove_file(&path);

    let logger = DebugLogger::new(false, path.to_str().unwrap()).await;
    assert!(!logger.is_enabled());

    let (game, board, me) = fixtures();
    let bot = Bot::with_logger(Config::default_hardcoded(), logger.clone());
    let decision = bot.decide(&game, 0, &board, &me);

    assert!(logger
        .log_move(&game.id, 0, &me.id, &board, &decision)
        .is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unwritable_path_falls_back_to_disabled() {
    let logger = DebugLogger::new(true, "/nonexistent-dir/debug.jsonl").await;
    assert!(!logger.is_enabled());
}

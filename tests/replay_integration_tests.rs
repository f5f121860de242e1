// Integration tests for the replay binary
//
// Runs the compiled `replay` tool against the JSONL fixtures and checks
// its exit status and report output.

use std::path::PathBuf;
use std::process::Command;

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// Helper to run replay binary with arguments
fn run_replay(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_replay"))
        .args(args)
        .output()
        .expect("Failed to execute replay binary")
}

#[test]
fn test_replay_help() {
    let output = run_replay(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Battlesnake Replay Tool"), "Should show tool name");
    assert!(stderr.contains("USAGE:"), "Should show usage section");
    assert!(stderr.contains("--seed"), "Should document the seed option");
}

#[test]
fn test_replay_no_arguments() {
    let output = run_replay(&[]);
    assert!(!output.status.success(), "Should fail with no arguments");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("USAGE:"), "Should show usage when arguments missing");
}

#[test]
fn test_replay_requires_a_mode() {
    let fixture = fixture_path("food_chase.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Must specify --all, --turns, or --validate"));
}

#[test]
fn test_replay_all_food_chase() {
    let fixture = fixture_path("food_chase.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--all"]);

    assert!(output.status.success(), "Replay all should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded 3 log entries"), "Should load 3 entries");
    assert!(stdout.contains("REPLAY REPORT"), "Should show replay report");
    assert!(stdout.contains("Matches:        3 (100.0%)"), "{}", stdout);
    assert!(stdout.contains("Inconsistent:   0"), "{}", stdout);
}

#[test]
fn test_replay_all_lists_inconsistent_turns() {
    let fixture = fixture_path("mixed_outcomes.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--all", "--seed", "5"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Inconsistent:   2"), "{}", stdout);
    assert!(stdout.contains("DETAILED INCONSISTENCIES"), "{}", stdout);
    assert!(stdout.contains("Turn 2: down →"), "{}", stdout);
}

#[test]
fn test_replay_specific_turns() {
    let fixture = fixture_path("food_chase.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--turns", "0,2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replaying 2 specific turn(s)"), "{}", stdout);
    assert!(stdout.contains("Total Turns:    2"), "{}", stdout);
}

#[test]
fn test_replay_unknown_turn_fails() {
    let fixture = fixture_path("food_chase.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--turns", "99"]);
    assert!(!output.status.success());
}

#[test]
fn test_validate_success_and_failure() {
    let fixture = fixture_path("mixed_outcomes.jsonl");

    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "0:left|right,1:down"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All expected moves validated successfully"));

    let output = run_replay(&[fixture.to_str().unwrap(), "--validate", "1:up"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Validation failed"), "{}", stderr);
}

#[test]
fn test_invalid_seed_is_rejected() {
    let fixture = fixture_path("food_chase.jsonl");
    let output = run_replay(&[fixture.to_str().unwrap(), "--all", "--seed", "abc"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid seed"), "{}", stderr);
}

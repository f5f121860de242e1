// Greedy food-seeking decision engine
//
// One pure pass per turn: build the safety set, head for the nearest food if
// an axis-aligned step toward it is safe, otherwise pick a random safe move.
// Nothing here keeps state between calls.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::safety::MoveSafety;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Direction returned when every move is unsafe
pub const NO_SAFE_MOVE_FALLBACK: Direction = Direction::Down;

/// Order in which food-approaching moves are tried
const FOOD_PRIORITY: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Down,
    Direction::Up,
];

/// Why a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveReason {
    /// Stepping toward the closest food
    TowardFood { target: Coord },
    /// Uniform pick among the remaining safe moves
    RandomSafe { candidates: usize },
    /// Nothing was safe
    NoSafeMoves,
}

impl fmt::Display for MoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveReason::TowardFood { target } => write!(f, "toward food at {}", target),
            MoveReason::RandomSafe { candidates } => {
                write!(f, "random among {} safe moves", candidates)
            }
            MoveReason::NoSafeMoves => f.write_str("no safe moves"),
        }
    }
}

/// Outcome of a single decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: MoveReason,
    pub safety: MoveSafety,
}

/// Chooses the next move for `you` on `board`.
///
/// Always returns one of the four directions. `rng` is only consulted when
/// falling back to a random safe move.
pub fn decide_move<R: Rng>(board: &Board, you: &Battlesnake, rng: &mut R) -> Decision {
    let head = you.head_position();
    let safety = MoveSafety::evaluate(board, you);

    if let Some(target) = closest_food(head, &board.food) {
        if let Some(direction) = step_toward(head, target, &safety) {
            return Decision {
                direction,
                reason: MoveReason::TowardFood { target },
                safety,
            };
        }
    }

    let safe_moves = safety.safe_moves();
    if safe_moves.is_empty() {
        warn!("No safe moves detected! Moving {}", NO_SAFE_MOVE_FALLBACK);
        return Decision {
            direction: NO_SAFE_MOVE_FALLBACK,
            reason: MoveReason::NoSafeMoves,
            safety,
        };
    }

    let direction = safe_moves[rng.random_range(0..safe_moves.len())];
    debug!("Picked {} from safe moves {:?}", direction, safe_moves);

    Decision {
        direction,
        reason: MoveReason::RandomSafe {
            candidates: safe_moves.len(),
        },
        safety,
    }
}

/// Food with the smallest Manhattan distance from `head`.
/// Ties go to the earliest entry (`min_by_key` keeps the first minimum).
pub fn closest_food(head: Coord, food: &[Coord]) -> Option<Coord> {
    food.iter()
        .min_by_key(|f| head.manhattan_distance(f))
        .copied()
}

/// First direction in left, right, down, up order that moves strictly closer
/// to `target` along its own axis and is still safe.
pub fn step_toward(head: Coord, target: Coord, safety: &MoveSafety) -> Option<Direction> {
    FOOD_PRIORITY
        .iter()
        .copied()
        .find(|&dir| approaches(head, target, dir) && safety.is_safe(dir))
}

fn approaches(head: Coord, target: Coord, dir: Direction) -> bool {
    match dir {
        Direction::Left => target.x < head.x,
        Direction::Right => target.x > head.x,
        Direction::Down => target.y < head.y,
        Direction::Up => target.y > head.y,
    }
}

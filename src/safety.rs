// Per-turn move safety
//
// MoveSafety starts with every direction allowed and only ever loses
// directions. Each exclusion pass below looks one step ahead of the head
// and clears the directions that would be fatal.

use log::debug;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Which of the four directions are still considered safe this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSafety {
    safe: [bool; 4],
}

impl Default for MoveSafety {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSafety {
    /// Creates a safety set with all four directions allowed
    pub fn new() -> Self {
        MoveSafety { safe: [true; 4] }
    }

    /// Marks a direction unsafe. There is no way to re-enable it.
    pub fn exclude(&mut self, dir: Direction) {
        self.safe[dir.index()] = false;
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        self.safe[dir.index()]
    }

    /// Safe directions in up, down, left, right order
    pub fn safe_moves(&self) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|dir| self.is_safe(*dir))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.safe.iter().any(|&s| s)
    }

    /// Computes the full safety set for `you` on `board`
    ///
    /// All four exclusion rules run before anything reads the result:
    /// backward move, board edges, own body, other snakes' bodies.
    pub fn evaluate(board: &Board, you: &Battlesnake) -> Self {
        let head = you.head_position();
        let mut safety = MoveSafety::new();

        safety.exclude_backward(head, you.neck());
        safety.exclude_out_of_bounds(head, board.width, board.height);
        safety.exclude_occupied(head, &you.body);

        for snake in board.snakes.iter().filter(|s| s.id != you.id) {
            safety.exclude_occupied(head, &snake.body);
        }

        debug!("Safety for head {}: {:?}", head, safety.safe_moves());
        safety
    }

    /// Excludes the direction that would put the head back onto the neck.
    /// A neck stacked on the head, or missing entirely, excludes nothing.
    /// A neck that is not adjacent to the head also excludes nothing; the
    /// occupancy pass already covers every adjacent body segment.
    pub fn exclude_backward(&mut self, head: Coord, neck: Option<Coord>) {
        let neck = match neck {
            Some(n) => n,
            None => return,
        };

        for dir in Direction::all() {
            if dir.apply(&head) == neck {
                debug!("Excluding {} (backward onto neck {})", dir, neck);
                self.exclude(dir);
            }
        }
    }

    /// Excludes directions that would leave the board
    pub fn exclude_out_of_bounds(&mut self, head: Coord, width: i32, height: i32) {
        if head.x == 0 {
            self.exclude(Direction::Left);
        }
        if head.x == width.saturating_sub(1) {
            self.exclude(Direction::Right);
        }
        if head.y == 0 {
            self.exclude(Direction::Down);
        }
        if head.y == height.saturating_sub(1) {
            self.exclude(Direction::Up);
        }
    }

    /// Excludes every direction whose next cell is one of `segments`.
    /// Scans the whole body; tails count as occupied.
    pub fn exclude_occupied(&mut self, head: Coord, segments: &[Coord]) {
        let neighbours = Direction::all().map(|dir| (dir, dir.apply(&head)));

        for segment in segments {
            for (dir, next) in neighbours.iter() {
                if next == segment && self.is_safe(*dir) {
                    debug!("Excluding {} (occupied {})", dir, segment);
                    self.exclude(*dir);
                }
            }
        }
    }
}

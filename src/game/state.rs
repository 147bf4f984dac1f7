use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance, ignoring any wrap-around
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The snake in the game
///
/// Segments are kept in order (head first) alongside a set of occupied
/// cells, so membership tests do not scan the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    cells: HashSet<Position>,
    /// Direction of the last applied move
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body: VecDeque<Position> = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();
        let cells = body.iter().copied().collect();

        Self {
            body,
            cells,
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        self.cells.insert(new_head);

        if !grow {
            if let Some(tail) = self.body.pop_back() {
                if tail != new_head {
                    self.cells.remove(&tail);
                }
            }
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left a bounded grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Snake ran into an obstacle
    Obstacle,
    /// An obstacle moved onto the snake
    CaughtByObstacle,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Collision(CollisionType),
    /// No free cell was left to place food or obstacles
    BoardFull,
}

impl GameOverReason {
    pub fn describe(&self) -> &'static str {
        match self {
            GameOverReason::Collision(CollisionType::Wall) => "Hit the wall",
            GameOverReason::Collision(CollisionType::SelfCollision) => "Bit your own tail",
            GameOverReason::Collision(CollisionType::Obstacle) => "Crashed into an obstacle",
            GameOverReason::Collision(CollisionType::CaughtByObstacle) => "Caught by an obstacle",
            GameOverReason::BoardFull => "No room left on the board",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// Owned, read-only view of a game, enough to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub power_ups: Vec<Position>,
    pub power_up_ticks_remaining: u32,
    pub score: u32,
    pub level: u32,
    pub steps: u32,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
    pub tick_interval: Duration,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 1);
        assert_eq!(a.manhattan_distance(Position::new(4, 5)), 7);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let body: Vec<_> = snake.segments().collect();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        // Move with growing
        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_occupancy_index() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5))); // head
        assert!(snake.occupies(Position::new(4, 5))); // body
        assert!(snake.occupies(Position::new(3, 5))); // tail
        assert!(!snake.occupies(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_advance_into_own_tail_keeps_cell_marked() {
        // A 4-segment loop: head moving into the cell the tail is leaving
        let mut snake = Snake::new(Position::new(1, 0), Direction::Right, 2);
        snake.advance(Position::new(1, 1), true);
        snake.advance(Position::new(0, 1), true);
        assert_eq!(snake.tail(), Position::new(0, 0));

        snake.advance(Position::new(0, 0), false);
        assert!(snake.occupies(Position::new(0, 0)));
        assert_eq!(snake.len(), 4);
    }
}

use rand::Rng;
use rand::seq::IteratorRandom;

use super::config::EdgePolicy;
use super::error::GameError;
use super::state::Position;

/// Grid dimensions together with the edge policy that governs every move on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    edges: EdgePolicy,
}

impl Grid {
    pub fn new(width: usize, height: usize, edges: EdgePolicy) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            edges,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn edges(&self) -> EdgePolicy {
        self.edges
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Where a snake ends up after moving by (dx, dy).
    ///
    /// `None` means the move left a bounded grid.
    pub fn step(&self, pos: Position, dx: i32, dy: i32) -> Option<Position> {
        let moved = pos.moved_by(dx, dy);
        match self.edges {
            EdgePolicy::Bounded => self.contains(moved).then_some(moved),
            EdgePolicy::Wrapped => Some(self.wrap(moved)),
        }
    }

    /// Like [`Grid::step`], but a bounded grid holds the position at its edge
    /// instead of rejecting the move.
    pub fn step_within(&self, pos: Position, dx: i32, dy: i32) -> Position {
        let moved = pos.moved_by(dx, dy);
        match self.edges {
            EdgePolicy::Bounded => Position::new(
                moved.x.clamp(0, self.width - 1),
                moved.y.clamp(0, self.height - 1),
            ),
            EdgePolicy::Wrapped => self.wrap(moved),
        }
    }

    fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Pick a uniformly random cell for which `is_free` holds.
    ///
    /// Samples blindly first, which is fast on a sparse board, then falls back
    /// to choosing among the enumerated free cells so a crowded board never
    /// spins. Fails only when no cell is free.
    pub fn random_free_cell<R, F>(&self, rng: &mut R, is_free: F) -> Result<Position, GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        for _ in 0..self.cell_count() {
            let pos = Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if is_free(pos) {
                return Ok(pos);
            }
        }

        self.cells()
            .filter(|&pos| is_free(pos))
            .choose(rng)
            .ok_or(GameError::NoSpaceAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20, EdgePolicy::Bounded);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_bounded_step_rejects_leaving_grid() {
        let grid = Grid::new(10, 10, EdgePolicy::Bounded);
        assert_eq!(grid.step(Position::new(9, 3), 1, 0), None);
        assert_eq!(grid.step(Position::new(3, 0), 0, -1), None);
        assert_eq!(grid.step(Position::new(8, 3), 1, 0), Some(Position::new(9, 3)));
    }

    #[test]
    fn test_wrapped_step_wraps_both_axes() {
        let grid = Grid::new(10, 8, EdgePolicy::Wrapped);
        assert_eq!(grid.step(Position::new(9, 3), 1, 0), Some(Position::new(0, 3)));
        assert_eq!(grid.step(Position::new(0, 3), -1, 0), Some(Position::new(9, 3)));
        assert_eq!(grid.step(Position::new(4, 0), 0, -1), Some(Position::new(4, 7)));
        assert_eq!(grid.step(Position::new(4, 7), 0, 1), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_step_within_clamps_on_bounded_grid() {
        let grid = Grid::new(10, 10, EdgePolicy::Bounded);
        assert_eq!(grid.step_within(Position::new(0, 9), -1, 1), Position::new(0, 9));

        let grid = Grid::new(10, 10, EdgePolicy::Wrapped);
        assert_eq!(grid.step_within(Position::new(0, 9), -1, 1), Position::new(9, 0));
    }

    #[test]
    fn test_random_free_cell_respects_predicate() {
        let grid = Grid::new(5, 5, EdgePolicy::Wrapped);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let pos = grid.random_free_cell(&mut rng, |p| p.x >= 3).unwrap();
            assert!(pos.x >= 3);
            assert!(grid.contains(pos));
        }
    }

    #[test]
    fn test_random_free_cell_finds_single_hole() {
        let grid = Grid::new(6, 6, EdgePolicy::Bounded);
        let hole = Position::new(4, 1);
        let mut rng = StdRng::seed_from_u64(1);

        let pos = grid.random_free_cell(&mut rng, |p| p == hole).unwrap();
        assert_eq!(pos, hole);
    }

    #[test]
    fn test_random_free_cell_full_grid() {
        let grid = Grid::new(3, 3, EdgePolicy::Bounded);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            grid.random_free_cell(&mut rng, |_| false),
            Err(GameError::NoSpaceAvailable)
        );
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = Grid::new(4, 3, EdgePolicy::Bounded);
        assert_eq!(grid.cells().count(), 12);
        assert!(grid.cells().all(|p| grid.contains(p)));
    }
}

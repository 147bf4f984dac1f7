use rand::Rng;

use super::grid::Grid;
use super::state::Position;

/// Next cell for an obstacle hunting the snake head.
///
/// Far from the head (Manhattan distance above `chase_distance`) the obstacle
/// closes in by one cell on each axis independently. Near the head it
/// wanders, shifting by -1, 0 or +1 on each axis.
pub fn next_position<R: Rng + ?Sized>(
    obstacle: Position,
    head: Position,
    grid: &Grid,
    chase_distance: i32,
    rng: &mut R,
) -> Position {
    let (dx, dy) = if obstacle.manhattan_distance(head) > chase_distance {
        ((head.x - obstacle.x).signum(), (head.y - obstacle.y).signum())
    } else {
        (rng.gen_range(-1..=1), rng.gen_range(-1..=1))
    };

    grid.step_within(obstacle, dx, dy)
}

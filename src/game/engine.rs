use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    grid::Grid,
    obstacle,
    power_up::PowerUpTimer,
    schedule::TickSchedule,
    state::{CollisionType, GameOverReason, GameSnapshot, GameStatus, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the snake picked up a power-up this step
    pub collected_power_up: bool,
    /// Whether the level went up this step
    pub leveled_up: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the simulation moved at all (false while paused or over)
    pub advanced: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            advanced: false,
            terminated,
            info: StepInfo::default(),
        }
    }
}

/// The game engine that owns a single game and all of its rules
///
/// An external driver calls [`GameEngine::tick`] at the cadence given by
/// [`GameEngine::tick_interval`] and forwards input between ticks.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    schedule: TickSchedule,
    rng: R,
    snake: Snake,
    pending_direction: Option<Direction>,
    food: Position,
    obstacles: Vec<Position>,
    obstacle_cells: HashSet<Position>,
    power_ups: Vec<Position>,
    power_up_timer: PowerUpTimer,
    score: u32,
    level: u32,
    steps: u32,
    paused: bool,
    game_over: Option<GameOverReason>,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose random choices repeat for the same seed
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let snake = initial_snake(&config);
        let mut engine = Self {
            grid: Grid::new(config.grid_width, config.grid_height, config.edge_policy),
            schedule: TickSchedule::from_config(&config),
            rng,
            // Placeholder on the snake, replaced below
            food: snake.head(),
            snake,
            pending_direction: None,
            obstacles: Vec::new(),
            obstacle_cells: HashSet::new(),
            power_ups: Vec::new(),
            power_up_timer: PowerUpTimer::new(config.power_up_effect),
            score: 0,
            level: 1,
            steps: 0,
            paused: false,
            game_over: None,
            config,
        };
        engine.food = engine.spawn_free_cell()?;

        Ok(engine)
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.snake = initial_snake(&self.config);
        self.food = self.snake.head();
        self.pending_direction = None;
        self.obstacles.clear();
        self.obstacle_cells.clear();
        self.power_ups.clear();
        self.power_up_timer = PowerUpTimer::new(self.config.power_up_effect);
        self.score = 0;
        self.level = 1;
        self.steps = 0;
        self.paused = false;
        self.game_over = None;
        self.food = self.spawn_free_cell()?;

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            edges = ?self.grid.edges(),
            "new game"
        );
        Ok(())
    }

    /// Request a turn, applied at the start of the next tick.
    ///
    /// A reversal of the current heading is ignored, as is any input after
    /// the game has ended.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.game_over.is_some() || self.snake.direction.is_opposite(direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    pub fn toggle_pause(&mut self) {
        if self.game_over.is_some() {
            return;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> StepResult {
        if self.game_over.is_some() {
            return StepResult::idle(true);
        }
        if self.paused {
            return StepResult::idle(false);
        }

        if let Some(direction) = self.pending_direction.take() {
            self.snake.direction = direction;
        }
        self.steps += 1;
        let mut step_info = StepInfo::default();

        // Move the head, ending the game on a collision
        let (dx, dy) = self.snake.direction.delta();
        let Some(new_head) = self.grid.step(self.snake.head(), dx, dy) else {
            return self.end_game(GameOverReason::Collision(CollisionType::Wall), step_info);
        };
        if self.snake.occupies(new_head) {
            return self.end_game(
                GameOverReason::Collision(CollisionType::SelfCollision),
                step_info,
            );
        }
        if self.obstacle_cells.contains(&new_head) {
            return self.end_game(GameOverReason::Collision(CollisionType::Obstacle), step_info);
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        if ate_food {
            self.score += 1;
            step_info.ate_food = true;
            match self.spawn_free_cell() {
                Ok(food) => self.food = food,
                Err(err) => {
                    warn!(%err, "cannot place food");
                    return self.end_game(GameOverReason::BoardFull, step_info);
                }
            }
        }

        if self.config.power_ups_enabled {
            step_info.collected_power_up = self.update_power_ups(new_head);
        }

        match self.check_level_up() {
            Ok(leveled_up) => step_info.leveled_up = leveled_up,
            Err(err) => {
                warn!(%err, level = self.level, "cannot place obstacles");
                return self.end_game(GameOverReason::BoardFull, step_info);
            }
        }

        if !self.obstacles.is_empty()
            && !self.power_up_timer.freezes_obstacles()
            && self.move_obstacles()
        {
            return self.end_game(
                GameOverReason::Collision(CollisionType::CaughtByObstacle),
                step_info,
            );
        }

        StepResult {
            advanced: true,
            terminated: false,
            info: step_info,
        }
    }

    fn end_game(&mut self, reason: GameOverReason, mut step_info: StepInfo) -> StepResult {
        if let GameOverReason::Collision(collision) = reason {
            step_info.collision_type = Some(collision);
        }
        self.game_over = Some(reason);
        self.pending_direction = None;

        info!(
            score = self.score,
            level = self.level,
            steps = self.steps,
            ?reason,
            "game over"
        );

        StepResult {
            advanced: true,
            terminated: true,
            info: step_info,
        }
    }

    /// Collect a power-up under the head, run the effect timer and maybe
    /// spawn a new power-up. Returns whether one was collected.
    fn update_power_ups(&mut self, head: Position) -> bool {
        let collected = match self.power_ups.iter().position(|&p| p == head) {
            Some(index) => {
                self.power_ups.remove(index);
                self.power_up_timer.activate(self.config.power_up_duration);
                debug!(x = head.x, y = head.y, "power-up collected");
                true
            }
            None => {
                self.power_up_timer.tick();
                false
            }
        };

        if self.power_ups.len() < self.config.max_power_ups
            && self.rng.gen_bool(self.config.power_up_spawn_chance)
        {
            match self.spawn_free_cell() {
                Ok(pos) => self.power_ups.push(pos),
                Err(err) => debug!(%err, "skipping power-up spawn"),
            }
        }

        collected
    }

    /// Raise the level once the score reaches `level * points_per_level`,
    /// adding `level` (the new level) obstacles when they are enabled
    fn check_level_up(&mut self) -> Result<bool, GameError> {
        let threshold = self.level.saturating_mul(self.config.points_per_level);
        if self.score < threshold {
            return Ok(false);
        }

        self.level += 1;
        if self.config.obstacles_enabled {
            for _ in 0..self.level {
                let pos = self.spawn_free_cell()?;
                self.obstacles.push(pos);
                self.obstacle_cells.insert(pos);
            }
        }

        info!(
            level = self.level,
            obstacles = self.obstacles.len(),
            interval_ms = self.tick_interval().as_millis() as u64,
            "level up"
        );
        Ok(true)
    }

    /// Step every obstacle toward the head. Returns true if one lands on the snake.
    fn move_obstacles(&mut self) -> bool {
        let head = self.snake.head();
        let mut caught = false;

        for index in 0..self.obstacles.len() {
            let next = obstacle::next_position(
                self.obstacles[index],
                head,
                &self.grid,
                self.config.chase_distance,
                &mut self.rng,
            );
            if self.snake.occupies(next) {
                caught = true;
                break;
            }
            self.obstacles[index] = next;
        }

        self.obstacle_cells = self.obstacles.iter().copied().collect();
        caught
    }

    /// A random cell free of the snake, obstacles, food and power-ups
    fn spawn_free_cell(&mut self) -> Result<Position, GameError> {
        let snake = &self.snake;
        let obstacles = &self.obstacle_cells;
        let food = self.food;
        let power_ups = &self.power_ups;

        self.grid.random_free_cell(&mut self.rng, |pos| {
            !snake.occupies(pos)
                && !obstacles.contains(&pos)
                && pos != food
                && !power_ups.contains(&pos)
        })
    }
}

impl<R> GameEngine<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Heading of the last applied move
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    pub fn power_ups(&self) -> &[Position] {
        &self.power_ups
    }

    pub fn power_up_ticks_remaining(&self) -> u32 {
        self.power_up_timer.remaining()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        match (self.game_over, self.paused) {
            (Some(_), _) => GameStatus::GameOver,
            (None, true) => GameStatus::Paused,
            (None, false) => GameStatus::Running,
        }
    }

    /// How long the driver should wait between ticks at the current level
    pub fn tick_interval(&self) -> Duration {
        self.schedule.interval_for_level(self.level)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            snake: self.snake.segments().collect(),
            direction: self.snake.direction,
            food: self.food,
            obstacles: self.obstacles.clone(),
            power_ups: self.power_ups.clone(),
            power_up_ticks_remaining: self.power_up_timer.remaining(),
            score: self.score,
            level: self.level,
            steps: self.steps,
            status: self.status(),
            game_over_reason: self.game_over,
            tick_interval: self.tick_interval(),
        }
    }
}

/// Snake of the configured length centred on the grid, heading right
fn initial_snake(config: &GameConfig) -> Snake {
    let center_x = (config.grid_width / 2) as i32;
    let center_y = (config.grid_height / 2) as i32;

    Snake::new(
        Position::new(center_x, center_y),
        Direction::Right,
        config.initial_snake_length,
    )
}

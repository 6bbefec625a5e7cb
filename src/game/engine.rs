use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{
    action::{Direction, SnakeId},
    config::GameConfig,
    food::Food,
    grid::{Grid, Position},
    snake::Snake,
};

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// A head left the grid
    Wall,
    /// A head ran into its own body
    SelfCollision,
    /// The two snakes touched
    SnakeCollision,
}

/// Something the driver may want to react to (sound, stats)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Ate(SnakeId),
    Collision(CollisionType),
    SecondSnakeSpawned,
}

/// Result of one simulation tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// Set when the tick ended the game
    pub collision: Option<CollisionType>,
    /// Score the game ended with, set together with `collision`
    pub final_score: Option<u32>,
}

impl TickOutcome {
    pub fn ate_food(&self) -> bool {
        self.events.iter().any(|e| matches!(e, GameEvent::Ate(_)))
    }

    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }
}

/// The whole simulation: one or two snakes, one food, score and lifecycle
pub struct Game {
    config: GameConfig,
    grid: Grid,
    primary: Snake,
    secondary: Option<Snake>,
    food: Food,
    running: bool,
    score: u32,
    rng: StdRng,
}

impl Game {
    /// Start a running game with the primary snake at its spawn cells
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::new(config.grid_size);
        let primary = Snake::new();
        let occupied: HashSet<Position> = primary.body().collect();
        let food = Food::spawn(&mut rng, grid, &occupied)
            .unwrap_or_else(|| Food::new(Position::new(0, 0)));

        Self {
            config,
            grid,
            primary,
            secondary: None,
            food,
            running: true,
            score: 0,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn primary(&self) -> &Snake {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&Snake> {
        self.secondary.as_ref()
    }

    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        match id {
            SnakeId::Primary => Some(&self.primary),
            SnakeId::Secondary => self.secondary.as_ref(),
        }
    }

    fn snake_mut(&mut self, id: SnakeId) -> Option<&mut Snake> {
        match id {
            SnakeId::Primary => Some(&mut self.primary),
            SnakeId::Secondary => self.secondary.as_mut(),
        }
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leave the game-over state. Returns false if the game was already running.
    pub fn restart(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        info!("game restarted");
        true
    }

    /// Route a turn request to a snake. Requests for the absent secondary
    /// snake are dropped. Returns whether the turn was accepted.
    pub fn set_direction(&mut self, id: SnakeId, direction: Direction) -> bool {
        self.snake_mut(id)
            .is_some_and(|snake| snake.set_direction(direction))
    }

    /// Advance the simulation by one step. Does nothing while game over.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.running {
            return outcome;
        }

        self.step_snake(SnakeId::Primary, &mut outcome);
        if !outcome.is_game_over() && self.secondary.is_some() {
            self.step_snake(SnakeId::Secondary, &mut outcome);
        }

        if !outcome.is_game_over()
            && self.secondary.is_none()
            && self.score >= self.config.second_snake_threshold
        {
            self.secondary = Some(Snake::new());
            outcome.events.push(GameEvent::SecondSnakeSpawned);
            info!(score = self.score, "second snake joined");
        }

        outcome
    }

    /// Move, feed, and collision-check one snake
    fn step_snake(&mut self, id: SnakeId, outcome: &mut TickOutcome) {
        let head = match self.snake_mut(id) {
            Some(snake) => {
                snake.advance();
                snake.head()
            }
            None => return,
        };

        if head == self.food.position() {
            self.feed(id);
            outcome.events.push(GameEvent::Ate(id));
        }

        if let Some(kind) = self.detect_collision(id) {
            outcome.final_score = Some(self.game_over(kind));
            outcome.collision = Some(kind);
            outcome.events.push(GameEvent::Collision(kind));
            return;
        }

        if let Some(snake) = self.snake_mut(id) {
            snake.end_tick();
        }
    }

    fn feed(&mut self, id: SnakeId) {
        self.relocate_food();
        if let Some(snake) = self.snake_mut(id) {
            snake.grow();
        }
        self.score += 1;
        debug!(?id, score = self.score, food = ?self.food.position(), "ate food");
    }

    /// Food placement only avoids the primary snake
    fn relocate_food(&mut self) {
        let occupied: HashSet<Position> = self.primary.body().collect();
        if self
            .food
            .relocate(&mut self.rng, self.grid, &occupied)
            .is_none()
        {
            warn!("no free cell for food, leaving it in place");
        }
    }

    fn detect_collision(&self, id: SnakeId) -> Option<CollisionType> {
        let snake = self.snake(id)?;
        let head = snake.head();

        if !self.grid.contains(head) {
            return Some(CollisionType::Wall);
        }

        if snake.bites_itself() {
            return Some(CollisionType::SelfCollision);
        }

        if id == SnakeId::Secondary
            && (self.primary.occupies(head) || snake.occupies(self.primary.head()))
        {
            return Some(CollisionType::SnakeCollision);
        }

        None
    }

    /// Back to the starting layout, stopped. Returns the score that was lost.
    fn game_over(&mut self, kind: CollisionType) -> u32 {
        let final_score = self.score;
        info!(?kind, score = final_score, "game over");
        self.primary.reset();
        self.relocate_food();
        self.running = false;
        self.score = 0;
        self.secondary = None;
        final_score
    }
}

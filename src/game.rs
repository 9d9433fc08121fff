use tracing::debug;

use crate::config::Config;
use crate::entities::{
    Entity, EntityId, EntityKind, GLYPH_COLUMNS, GLYPH_ROWS, Paddle, ScoreDisplay, Vector2,
};
use crate::surface::{BLACK, Surface, WHITE};

/// A paddle direction the human player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
}

/// The two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

/// Horizontal direction of a serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serve {
    Left,
    Right,
}

/// Outcome of a tick in which the ball left the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub winner: Side,
    pub player_score: u32,
    pub opponent_score: u32,
}

/// Handles of the entities every game owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roster {
    pub ball: EntityId,
    pub player: EntityId,
    pub opponent: EntityId,
    pub player_score: EntityId,
    pub opponent_score: EntityId,
}

/// Owns every entity and advances the simulation one fixed tick at a time
#[derive(Debug, Clone)]
pub struct Game {
    config: Config,
    /// Update and draw order is insertion order
    entities: Vec<Entity>,
    roster: Roster,
}

impl Game {
    pub fn new(config: Config) -> Self {
        let mut entities = Vec::with_capacity(5);
        let mut spawn = |entity: Entity| {
            entities.push(entity);
            EntityId::new(entities.len() - 1)
        };

        let ball = spawn(Entity::new(config.ball_size, EntityKind::Ball));
        let player = spawn(Entity::new(
            config.paddle_size,
            EntityKind::Player(Paddle::default()),
        ));
        let opponent = spawn(Entity::new(
            config.paddle_size,
            EntityKind::Opponent {
                paddle: Paddle::default(),
                follows: ball,
            },
        ));

        let glyph_size = Vector2::new(
            GLYPH_COLUMNS as f32 * config.glyph_pixel,
            GLYPH_ROWS as f32 * config.glyph_pixel,
        );
        let player_score = spawn(Entity::new(
            glyph_size,
            EntityKind::ScoreDisplay(ScoreDisplay::new(player)),
        ));
        let opponent_score = spawn(Entity::new(
            glyph_size,
            EntityKind::ScoreDisplay(ScoreDisplay::new(opponent)),
        ));

        let mut game = Self {
            entities,
            roster: Roster {
                ball,
                player,
                opponent,
                player_score,
                opponent_score,
            },
            config,
        };

        // Displays and paddle speeds never change after construction
        let paddle_speed = game.config.paddle_speed;
        let player_anchor = game.config.player_score_anchor;
        let opponent_anchor = game.config.opponent_score_anchor;
        game.entity_mut(player).velocity = Vector2::new(0.0, paddle_speed);
        game.entity_mut(opponent).velocity = Vector2::new(0.0, paddle_speed);
        game.entity_mut(player_score).position = player_anchor;
        game.entity_mut(opponent_score).position = opponent_anchor;

        game.reset(Serve::Right);
        game
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roster(&self) -> Roster {
        self.roster
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.index()]
    }

    /// Moves an entity; its kind and size stay as constructed
    pub fn set_motion(&mut self, id: EntityId, position: Vector2, velocity: Vector2) {
        let entity = self.entity_mut(id);
        entity.position = position;
        entity.velocity = velocity;
    }

    /// Overwrites one side's live score. Its display still never goes down.
    pub fn set_score(&mut self, side: Side, score: u32) {
        let id = self.paddle_id(side);
        if let Some(paddle) = self.entity_mut(id).paddle_mut() {
            paddle.score = score;
        }
    }

    pub fn ball(&self) -> &Entity {
        self.entity(self.roster.ball)
    }

    pub fn player(&self) -> &Entity {
        self.entity(self.roster.player)
    }

    pub fn opponent(&self) -> &Entity {
        self.entity(self.roster.opponent)
    }

    /// Live score of one side
    pub fn score(&self, side: Side) -> u32 {
        self.entity(self.paddle_id(side))
            .paddle()
            .map_or(0, |paddle| paddle.score)
    }

    /// Value currently shown by one side's score display
    pub fn displayed_score(&self, side: Side) -> u32 {
        let id = match side {
            Side::Player => self.roster.player_score,
            Side::Opponent => self.roster.opponent_score,
        };
        match self.entity(id).kind() {
            EntityKind::ScoreDisplay(display) => display.displayed,
            _ => 0,
        }
    }

    fn paddle_id(&self, side: Side) -> EntityId {
        match side {
            Side::Player => self.roster.player,
            Side::Opponent => self.roster.opponent,
        }
    }

    /// Press (`held = true`) or release a direction on the human paddle
    pub fn set_control(&mut self, control: Control, held: bool) {
        let player = self.roster.player;
        if let Some(paddle) = self.entity_mut(player).paddle_mut() {
            match control {
                Control::Up => paddle.moving_up = held,
                Control::Down => paddle.moving_down = held,
            }
        }
    }

    /// Advances one fixed tick. Returns the point when the ball left the arena.
    pub fn update(&mut self) -> Option<Point> {
        for index in 0..self.entities.len() {
            let tracked = self.entities[index]
                .kind()
                .tracked()
                .and_then(|id| self.entities.get(id.index()).copied());
            self.entities[index].update(&self.config, tracked.as_ref());
        }

        let ball = *self.ball();
        if ball.is_colliding(self.player()) || ball.is_colliding(self.opponent()) {
            let id = self.roster.ball;
            self.entity_mut(id).velocity.x = -ball.velocity.x;
        }

        let ball = *self.ball();
        if ball.right() > self.config.width || ball.left() < 0.0 {
            let exited_left = ball.position.x < self.config.width / 2.0;
            let winner = if exited_left {
                Side::Opponent
            } else {
                Side::Player
            };

            let winner_id = self.paddle_id(winner);
            if let Some(paddle) = self.entity_mut(winner_id).paddle_mut() {
                paddle.score = paddle.score.saturating_add(1);
            }

            let point = Point {
                winner,
                player_score: self.score(Side::Player),
                opponent_score: self.score(Side::Opponent),
            };
            debug!(
                winner = ?point.winner,
                player = point.player_score,
                opponent = point.opponent_score,
                "point scored"
            );

            self.reset(if exited_left { Serve::Left } else { Serve::Right });
            return Some(point);
        }

        None
    }

    /// Re-serves the ball from the center and re-centers both paddles. Scores
    /// and movement flags are left as they are.
    pub fn reset(&mut self, serve: Serve) {
        let center = self.config.center();
        let serve_velocity = self.config.serve_velocity;
        let inset = self.config.paddle_inset;
        let width = self.config.width;

        let direction = match serve {
            Serve::Left => -1.0,
            Serve::Right => 1.0,
        };

        let ball = self.entity_mut(self.roster.ball);
        ball.position = center;
        ball.velocity = Vector2::new(serve_velocity.x.abs() * direction, serve_velocity.y);

        let player = self.roster.player;
        let opponent = self.roster.opponent;
        self.entity_mut(player).position = Vector2::new(inset, center.y);
        self.entity_mut(opponent).position = Vector2::new(width - inset, center.y);
    }

    /// Clears the surface and draws every entity `fraction` of a tick ahead
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, fraction: f32) {
        let bounds = surface.bounds();
        surface.clear_and_fill(BLACK, bounds);

        surface.set_fill(WHITE);
        for entity in &self.entities {
            entity.draw(surface, &self.config, fraction);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

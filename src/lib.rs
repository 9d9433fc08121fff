// Library exports for testing
pub use app::{App, GameState};
pub use config::{Config, ConfigError, Settings};
pub use entities::{Entity, EntityId, EntityKind, Paddle, ScoreDisplay, Vector2};
pub use game::{Control, Game, Point, Roster, Serve, Side};
pub use input::{InputAction, InputManager};
pub use surface::{Bounds, RasterSurface, Surface};
pub use timestep::{FixedTimestep, FrameReport};

pub mod app;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
pub mod surface;
pub mod terminal;
pub mod timestep;

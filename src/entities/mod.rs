mod ball;
mod entity;
mod paddle;
mod score;
mod vector;

// Re-export all public types
pub use entity::{Entity, EntityId, EntityKind};
pub use paddle::Paddle;
pub use score::{GLYPH_COLUMNS, GLYPH_ROWS, ScoreDisplay, glyph};
pub use vector::Vector2;

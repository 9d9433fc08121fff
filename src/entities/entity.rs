use super::ball;
use super::paddle::{self, Paddle};
use super::score::{self, ScoreDisplay};
use super::vector::Vector2;
use crate::config::Config;
use crate::surface::Surface;

/// Stable handle of an entity inside the game's entity list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(usize);

impl EntityId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Behaviour attached to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Ball,
    Player(Paddle),
    /// A paddle steered toward another entity's height
    Opponent { paddle: Paddle, follows: EntityId },
    ScoreDisplay(ScoreDisplay),
}

impl EntityKind {
    /// The entity this one reads during its update, if any
    pub fn tracked(&self) -> Option<EntityId> {
        match self {
            EntityKind::Opponent { follows, .. } => Some(*follows),
            EntityKind::ScoreDisplay(display) => Some(display.tracks),
            EntityKind::Ball | EntityKind::Player(_) => None,
        }
    }
}

/// An axis-aligned rectangle centered on `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub position: Vector2,
    size: Vector2,
    pub velocity: Vector2,
    pub(super) kind: EntityKind,
}

impl Entity {
    pub fn new(size: Vector2, kind: EntityKind) -> Self {
        Self {
            position: Vector2::ZERO,
            size,
            velocity: Vector2::ZERO,
            kind,
        }
    }

    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// Fixed at construction
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y / 2.0
    }

    /// True when the two boxes overlap on both axes; touching edges do not count
    pub fn is_colliding(&self, other: &Entity) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        match &self.kind {
            EntityKind::Player(paddle) | EntityKind::Opponent { paddle, .. } => Some(paddle),
            _ => None,
        }
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        match &mut self.kind {
            EntityKind::Player(paddle) | EntityKind::Opponent { paddle, .. } => Some(paddle),
            _ => None,
        }
    }

    /// Advances this entity by one tick. `tracked` is a snapshot of the entity
    /// named by [`EntityKind::tracked`].
    pub fn update(&mut self, config: &Config, tracked: Option<&Entity>) {
        match self.kind {
            EntityKind::Ball => ball::update(self, config),
            EntityKind::Player(_) => paddle::update_player(self, config),
            EntityKind::Opponent { .. } => paddle::update_opponent(self, config, tracked),
            EntityKind::ScoreDisplay(_) => score::update(self, tracked),
        }
    }

    /// Draws the entity extrapolated `fraction` of a tick ahead
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &Config, fraction: f32) {
        match &self.kind {
            EntityKind::ScoreDisplay(display) => score::draw(self, display, surface, config),
            _ => {
                let at = self.position + self.velocity * fraction;
                surface.fill_rect(
                    at.x - self.size.x / 2.0,
                    at.y - self.size.y / 2.0,
                    self.size.x,
                    self.size.y,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RasterSurface, WHITE};

    fn block(x: f32, y: f32, w: f32, h: f32) -> Entity {
        let mut entity = Entity::new(Vector2::new(w, h), EntityKind::Ball);
        entity.position = Vector2::new(x, y);
        entity
    }

    #[test]
    fn test_edges_derive_from_center() {
        let entity = block(20.0, 128.0, 10.0, 75.0);
        assert_eq!(entity.left(), 15.0);
        assert_eq!(entity.right(), 25.0);
        assert_eq!(entity.top(), 90.5);
        assert_eq!(entity.bottom(), 165.5);
    }

    #[test]
    fn test_overlap_collides() {
        let a = block(10.0, 10.0, 10.0, 10.0);
        let b = block(18.0, 12.0, 10.0, 10.0);
        assert!(a.is_colliding(&b));
        assert!(b.is_colliding(&a));
    }

    #[test]
    fn test_containment_collides() {
        let outer = block(50.0, 50.0, 40.0, 40.0);
        let inner = block(50.0, 50.0, 4.0, 4.0);
        assert!(outer.is_colliding(&inner));
        assert!(inner.is_colliding(&outer));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = block(10.0, 10.0, 10.0, 10.0);
        let right = block(20.0, 10.0, 10.0, 10.0);
        let below = block(10.0, 20.0, 10.0, 10.0);
        assert!(!a.is_colliding(&right));
        assert!(!a.is_colliding(&below));
        assert!(!right.is_colliding(&a));
    }

    #[test]
    fn test_draw_extrapolates_by_velocity() {
        let config = Config::default();
        let mut entity = block(20.0, 20.0, 4.0, 4.0);
        entity.velocity = Vector2::new(4.0, 0.0);

        let mut surface = RasterSurface::new(64, 64);
        entity.draw(&mut surface, &config, 0.5);

        // Center moves from x=20 to x=22, so the box spans 20..24
        assert_eq!(surface.pixel(19, 20), Some(crate::surface::BLACK));
        assert_eq!(surface.pixel(20, 20), Some(WHITE));
        assert_eq!(surface.pixel(23, 20), Some(WHITE));
        assert_eq!(surface.lit_pixels(), 16);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_collision_is_symmetric(
                ax in 0.0f32..100.0, ay in 0.0f32..100.0,
                aw in 1.0f32..50.0, ah in 1.0f32..50.0,
                bx in 0.0f32..100.0, by in 0.0f32..100.0,
                bw in 1.0f32..50.0, bh in 1.0f32..50.0,
            ) {
                let a = block(ax, ay, aw, ah);
                let b = block(bx, by, bw, bh);
                prop_assert_eq!(a.is_colliding(&b), b.is_colliding(&a));
            }

            #[test]
            fn test_edge_contact_never_collides(
                x in 0i32..100, y in 0i32..100,
                offset in -7i32..8,
            ) {
                let (x, y) = (x as f32, y as f32);
                let a = block(x, y, 8.0, 8.0);
                let beside = block(x + 8.0, y + offset as f32, 8.0, 8.0);
                prop_assert!(!a.is_colliding(&beside));
            }
        }
    }
}

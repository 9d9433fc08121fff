use super::entity::{Entity, EntityId, EntityKind};
use crate::config::Config;
use crate::surface::Surface;

/// 3x5 bitmap font, row-major, '1' is a filled pixel
const DIGITS: [&str; 10] = [
    "111101101101111",
    "010010010010010",
    "111001111100111",
    "111001111001111",
    "101101111001001",
    "111100111001111",
    "111100111101111",
    "111001001001001",
    "111101111101111",
    "111101111001111",
];

pub const GLYPH_COLUMNS: usize = 3;
pub const GLYPH_ROWS: usize = 5;

/// Numeral showing a tracked paddle's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDisplay {
    pub tracks: EntityId,
    /// Last value shown; only ever raised
    pub displayed: u32,
}

impl ScoreDisplay {
    pub fn new(tracks: EntityId) -> Self {
        Self {
            tracks,
            displayed: 0,
        }
    }
}

/// Bitmap of a single decimal digit
pub fn glyph(digit: u8) -> &'static str {
    DIGITS[usize::from(digit % 10)]
}

pub(crate) fn update(entity: &mut Entity, tracked: Option<&Entity>) {
    let Some(live) = tracked.and_then(Entity::paddle).map(|paddle| paddle.score) else {
        return;
    };
    if let EntityKind::ScoreDisplay(display) = &mut entity.kind {
        display.displayed = display.displayed.max(live);
    }
}

/// Draws the displayed value centered on the entity's x, top-aligned with it
pub(crate) fn draw<S: Surface + ?Sized>(
    entity: &Entity,
    display: &ScoreDisplay,
    surface: &mut S,
    config: &Config,
) {
    let pixel = config.glyph_pixel;
    let cell_width = GLYPH_COLUMNS as f32 * pixel;
    let text = display.displayed.to_string();
    let count = text.len() as f32;
    let block_width = count * cell_width + (count - 1.0) * config.glyph_gap;

    let left = entity.position.x - block_width / 2.0;
    let top = entity.top();

    for (index, digit) in text.bytes().map(|b| b - b'0').enumerate() {
        let cell_left = left + index as f32 * (cell_width + config.glyph_gap);
        for (bit, filled) in glyph(digit).bytes().enumerate() {
            if filled != b'1' {
                continue;
            }
            let column = (bit % GLYPH_COLUMNS) as f32;
            let row = (bit / GLYPH_COLUMNS) as f32;
            surface.fill_rect(
                cell_left + column * pixel,
                top + row * pixel,
                pixel,
                pixel,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Paddle, Vector2};
    use crate::surface::{BLACK, RasterSurface, WHITE};

    fn display_at(x: f32, y: f32, displayed: u32) -> Entity {
        let config = Config::default();
        let size = Vector2::new(
            GLYPH_COLUMNS as f32 * config.glyph_pixel,
            GLYPH_ROWS as f32 * config.glyph_pixel,
        );
        let mut display = ScoreDisplay::new(EntityId::new(1));
        display.displayed = displayed;
        let mut entity = Entity::new(size, EntityKind::ScoreDisplay(display));
        entity.position = Vector2::new(x, y);
        entity
    }

    fn paddle_with_score(score: u32) -> Entity {
        let paddle = Paddle {
            score,
            ..Paddle::default()
        };
        Entity::new(Vector2::new(10.0, 75.0), EntityKind::Player(paddle))
    }

    fn displayed(entity: &Entity) -> u32 {
        match entity.kind {
            EntityKind::ScoreDisplay(display) => display.displayed,
            _ => panic!("not a score display"),
        }
    }

    #[test]
    fn test_every_glyph_is_a_full_bitmap() {
        for digit in 0..10 {
            let bitmap = glyph(digit);
            assert_eq!(bitmap.len(), GLYPH_COLUMNS * GLYPH_ROWS);
            assert!(bitmap.bytes().all(|b| b == b'0' || b == b'1'));
        }
        assert_ne!(glyph(0), glyph(8));
    }

    #[test]
    fn test_display_follows_live_score() {
        let config = Config::default();
        let mut display = display_at(128.0, 24.0, 0);
        display.update(&config, Some(&paddle_with_score(3)));
        assert_eq!(displayed(&display), 3);
    }

    #[test]
    fn test_display_never_decreases() {
        let config = Config::default();
        let mut display = display_at(128.0, 24.0, 7);
        display.update(&config, Some(&paddle_with_score(2)));
        assert_eq!(displayed(&display), 7);
    }

    #[test]
    fn test_zero_is_drawn_centered_on_anchor() {
        let config = Config::default();
        let entity = display_at(128.0, 24.0, 0);
        let mut surface = RasterSurface::new(512, 256);
        entity.draw(&mut surface, &config, 0.5);

        // 12 filled pixels of 4x4 units
        assert_eq!(surface.lit_pixels(), 12 * 16);
        // block spans x 122..134, y 14..34, with a hollow middle column
        assert_eq!(surface.pixel(122, 14), Some(WHITE));
        assert_eq!(surface.pixel(133, 33), Some(WHITE));
        assert_eq!(surface.pixel(121, 14), Some(BLACK));
        assert_eq!(surface.pixel(134, 14), Some(BLACK));
        assert_eq!(surface.pixel(128, 22), Some(BLACK));
    }

    #[test]
    fn test_multiple_digits_are_laid_out_with_gap() {
        let config = Config::default();
        let entity = display_at(128.0, 24.0, 10);
        let mut surface = RasterSurface::new(512, 256);
        entity.draw(&mut surface, &config, 0.0);

        // "1" has 5 pixels, "0" has 12; block is 12 + 4 + 12 = 28 wide from x=114
        assert_eq!(surface.lit_pixels(), (5 + 12) * 16);
        assert_eq!(surface.pixel(118, 14), Some(WHITE));
        assert_eq!(surface.pixel(114, 14), Some(BLACK));
        assert_eq!(surface.pixel(127, 14), Some(BLACK));
        assert_eq!(surface.pixel(130, 14), Some(WHITE));
        assert_eq!(surface.pixel(141, 33), Some(WHITE));
        assert_eq!(surface.pixel(142, 33), Some(BLACK));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_displayed_value_is_monotonic(
                scores in prop::collection::vec(0u32..1000, 1..100)
            ) {
                let config = Config::default();
                let mut display = display_at(128.0, 24.0, 0);
                let mut previous = 0;
                for score in scores {
                    display.update(&config, Some(&paddle_with_score(score)));
                    let shown = displayed(&display);
                    prop_assert!(shown >= previous);
                    prop_assert!(shown >= score);
                    previous = shown;
                }
            }
        }
    }
}

use std::ops::Range;

use image::{Rgb, RgbImage};

/// Color of a raster pixel
pub type Color = Rgb<u8>;

pub const BLACK: Color = Rgb([0, 0, 0]);
pub const WHITE: Color = Rgb([255, 255, 255]);

/// A rectangle in surface coordinates, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The drawing primitives the game needs from whatever it renders onto
pub trait Surface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Sets the color used by subsequent `fill_rect` calls
    fn set_fill(&mut self, color: Color);

    /// Fills `bounds` with `color` and leaves `color` as the current fill
    fn clear_and_fill(&mut self, color: Color, bounds: Bounds) {
        self.set_fill(color);
        self.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width(), self.height())
    }
}

/// In-memory raster the game is drawn onto before it reaches the terminal
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbImage,
    fill: Color,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BLACK),
            fill: WHITE,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Color at a pixel, `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Number of pixels that are not black
    pub fn lit_pixels(&self) -> usize {
        self.image.pixels().filter(|p| **p != BLACK).count()
    }
}

/// Pixel indices covered by `[start, start + len)`, clipped to `[0, limit)`
fn span(start: f32, len: f32, limit: u32) -> Range<u32> {
    if !start.is_finite() || !len.is_finite() || len <= 0.0 {
        return 0..0;
    }

    let lo = start.round().max(0.0);
    let hi = (start + len).round().min(limit as f32);
    if lo >= hi {
        return 0..0;
    }

    lo as u32..hi as u32
}

impl Surface for RasterSurface {
    fn width(&self) -> f32 {
        self.image.width() as f32
    }

    fn height(&self) -> f32 {
        self.image.height() as f32
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let columns = span(x, width, self.image.width());
        for row in span(y, height, self.image.height()) {
            for column in columns.clone() {
                self.image.put_pixel(column, row, self.fill);
            }
        }
    }
}

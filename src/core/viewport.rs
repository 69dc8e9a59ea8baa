use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Drawable area in physical pixels. Origin is the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero-sized dimensions (minimized windows) are clamped to one pixel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel coordinates to normalized device coordinates (x right, y up, [-1, 1])
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.width as f32 * 2.0 - 1.0,
            1.0 - pixel.y / self.height as f32 * 2.0,
        )
    }

    /// Normalized device coordinates back to pixel coordinates
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }

    pub fn contains(&self, pixel: Vec2) -> bool {
        pixel.x >= 0.0
            && pixel.y >= 0.0
            && pixel.x <= self.width as f32
            && pixel.y <= self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

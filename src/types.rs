// Core value types shared by the extractor, the compositor and the session.

use std::fmt;

/// A full RGB frame. Each entry is 0x00RRGGBB, the layout minifb presents directly.
/// Frames are replaced wholesale, never patched in place once they enter the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // image width in pixels
    pub height: usize,     // image height in pixels
    pub pixels: Vec<u32>,  // length = width * height
}

impl FrameBuffer {
    /// A frame filled with one colour.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color & 0x00FF_FFFF; width * height] }
    }

    /// Pixel at (x, y), or None outside the frame.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Integer pixel coordinate (window space == image space, no zoom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Feathered opacity for one extracted region, weights in [0,1].
/// 1 = take the cloned pixel, 0 = keep the destination pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatherMask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,   // length = width * height
}

impl FeatherMask {
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.alpha[y * self.width + x]
    }
}

#[inline]
pub(crate) fn unpack(px: u32) -> [u8; 3] {
    [((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8]
}

#[inline]
pub(crate) fn pack(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
}

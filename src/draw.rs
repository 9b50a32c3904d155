// Software drawing on top of a frame: brush circles, the guide line, HUD text.
// Everything clips silently at the frame edges.

use crate::types::{FrameBuffer, Point};

pub const TARGET_COLOR: u32 = 0x00_FF_00_00; // red: the spot being healed
pub const SOURCE_COLOR: u32 = 0x00_00_00_FF; // blue: where the clone comes from
pub const HUD_COLOR: u32 = 0x00_FF_FF_FF;

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a 1-pixel line between two points using Bresenham.
pub fn draw_line(fb: &mut FrameBuffer, from: Point, to: Point, color: u32) {
    let (mut x0, mut y0, x1, y1) = (from.x, from.y, to.x, to.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a 1-pixel circle outline (midpoint algorithm).
/// Visual: the brush footprint that follows the pointer.
pub fn draw_circle(fb: &mut FrameBuffer, center: Point, radius: u32, color: u32) {
    let (cx, cy) = (center.x, center.y);
    if radius == 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let mut x = radius as i32;
    let mut y = 0;
    let mut err = 1 - x;
    while x >= y {
        // one point per octant
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + px, cy + py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Endpoints of the line joining the source circle (at `mouse`) to the target circle,
/// pulled in by one brush radius at each end so it meets the outlines.
/// None while the circles overlap or touch (distance <= 2 * brush).
pub fn guide_segment(target: Point, mouse: Point, brush: u32) -> Option<(Point, Point)> {
    let dist = mouse.distance(target);
    if dist <= 2.0 * brush as f32 {
        return None;
    }
    let dx = (target.x - mouse.x) as f32 / dist;
    let dy = (target.y - mouse.y) as f32 / dist;
    let b = brush as f32;
    // truncate toward zero, like a plain integer cast of the float position
    let start = Point::new((mouse.x as f32 + dx * b) as i32, (mouse.y as f32 + dy * b) as i32);
    let end = Point::new((target.x as f32 - dx * b) as i32, (target.y as f32 - dy * b) as i32);
    Some((start, end))
}

/* ---------- 5x7 bitmap font (just what the HUD says: "TARGET | BRUSH: 20") ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a text string using 5x7 glyphs with a 1-pixel black shadow.
/// Unknown characters leave a blank cell.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    for (n, ch) in text.chars().enumerate() {
        let Some(rows) = glyph5x7(ch) else { continue };
        let gx = x + 6 * n as i32; // 5 pixels glyph width + 1 pixel spacing
        for (shadow, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, gx + rx + shadow, y + ry as i32 + shadow, c);
                    }
                }
            }
        }
    }
}

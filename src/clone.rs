// Seamless (gradient-domain) cloning.
// Visual expectation: the pasted patch keeps its own texture, but its colour and
// brightness bend to match whatever surrounds the spot it lands on, so no seam shows.
//
// We solve for a correction `h` with f = source + h. Keeping the source gradients
// means the Laplacian of h is zero inside the patch, and on the patch's outer ring h
// must turn the source into the destination: h = dest - source there.
use log::debug;

use crate::error::Error;
use crate::gamma;
use crate::types::{pack, unpack, FeatherMask, FrameBuffer, Point};

/// Solver limits. Previews run with the same settings as commits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloneParams {
    pub max_iterations: usize,
    /// Stop once the largest per-sweep update falls below this (in 0..255 units).
    pub tolerance: f32,
}

impl Default for CloneParams {
    fn default() -> Self {
        Self { max_iterations: 600, tolerance: 0.01 }
    }
}

/// Paste `source` centred on `target` inside a copy of `destination`.
///
/// `mask` must match `source` in size. Pixels with zero weight are held at the
/// destination value like the outer ring; the remaining weights feather the solved
/// patch over the destination in linear light.
pub fn seamless_clone(
    source: &FrameBuffer,
    mask: &FeatherMask,
    destination: &FrameBuffer,
    target: Point,
    params: &CloneParams,
) -> Result<FrameBuffer, Error> {
    if source.width != mask.width || source.height != mask.height {
        return Err(Error::DimensionMismatch(format!(
            "clone: source {}x{} vs mask {}x{}",
            source.width, source.height, mask.width, mask.height
        )));
    }

    let (w, h) = (source.width, source.height);
    let mut out = destination.clone();
    if w == 0 || h == 0 {
        return Ok(out);
    }

    // Top-left corner of the patch in destination space.
    let x0 = target.x as i64 - (w / 2) as i64;
    let y0 = target.y as i64 - (h / 2) as i64;
    if x0 < 0 || y0 < 0 || x0 + w as i64 > destination.width as i64 || y0 + h as i64 > destination.height as i64 {
        return Err(Error::OutOfBounds {
            center: target,
            brush: (w.max(h) / 2) as u32,
            width: destination.width,
            height: destination.height,
        });
    }
    let (x0, y0) = (x0 as usize, y0 as usize);

    let fixed: Vec<bool> = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            x == 0 || y == 0 || x == w - 1 || y == h - 1 || mask.alpha[i] <= 0.0
        })
        .collect();

    let dest_at = |i: usize| destination.pixels[(y0 + i / w) * destination.width + x0 + i % w];

    let mut solved = vec![[0u8; 3]; w * h];
    for c in 0..3 {
        let src: Vec<f32> = source.pixels.iter().map(|&p| unpack(p)[c] as f32).collect();
        let dst: Vec<f32> = (0..w * h).map(|i| unpack(dest_at(i))[c] as f32).collect();

        let (corr, sweeps) = solve_membrane(&src, &dst, &fixed, w, h, params);
        debug!("clone: channel {c} settled after {sweeps} sweeps");

        for i in 0..w * h {
            solved[i][c] = (src[i] + corr[i]).round().clamp(0.0, 255.0) as u8;
        }
    }

    let lut = gamma::lut();
    for (i, rgb) in solved.iter().enumerate() {
        let idx = (y0 + i / w) * destination.width + x0 + i % w;
        out.pixels[idx] = lut.mix(out.pixels[idx], pack(*rgb), mask.alpha[i]);
    }
    Ok(out)
}

/// Harmonic interpolation of the boundary correction over the free pixels
/// (red-black successive over-relaxation). Returns the correction and the sweep count.
fn solve_membrane(
    src: &[f32],
    dst: &[f32],
    fixed: &[bool],
    w: usize,
    h: usize,
    params: &CloneParams,
) -> (Vec<f32>, usize) {
    // Start free pixels at the mean boundary offset; a flat offset converges at once.
    let (sum, count) = fixed
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f)
        .fold((0.0_f64, 0usize), |(s, n), (i, _)| (s + (dst[i] - src[i]) as f64, n + 1));
    let mean = if count > 0 { (sum / count as f64) as f32 } else { 0.0 };

    let mut corr: Vec<f32> = (0..w * h).map(|i| if fixed[i] { dst[i] - src[i] } else { mean }).collect();

    let n = w.max(h) as f32;
    let omega = 2.0 / (1.0 + (std::f32::consts::PI / n).sin());

    let mut sweeps = 0;
    while sweeps < params.max_iterations {
        sweeps += 1;
        let mut largest = 0.0_f32;
        for parity in 0..2 {
            for y in 1..h.saturating_sub(1) {
                // start on the first x > 0 whose (x + y) has this parity
                let start = 1 + (y + 1 + parity) % 2;
                for x in (start..w - 1).step_by(2) {
                    let i = y * w + x;
                    if fixed[i] {
                        continue;
                    }
                    let avg = 0.25 * (corr[i - 1] + corr[i + 1] + corr[i - w] + corr[i + w]);
                    let delta = omega * (avg - corr[i]);
                    corr[i] += delta;
                    largest = largest.max(delta.abs());
                }
            }
        }
        if largest < params.tolerance {
            break;
        }
    }
    (corr, sweeps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{extract, feather_mask};

    const GRAY: u32 = 0x00_80_80_80;

    fn solid_mask(w: usize, h: usize) -> FeatherMask {
        FeatherMask { width: w, height: h, alpha: vec![1.0; w * h] }
    }

    #[test]
    fn flat_patch_onto_itself_is_a_no_op() {
        let img = FrameBuffer::filled(100, 100, GRAY);
        let (sub, mask) = extract(&img, Point::new(70, 70), 20).unwrap();
        let out = seamless_clone(&sub, &mask, &img, Point::new(30, 30), &CloneParams::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn flat_source_takes_the_destination_colour() {
        let dest = FrameBuffer::filled(40, 40, 0x00_32_32_32);
        let src = FrameBuffer::filled(16, 16, 0x00_C8_C8_C8);
        let out = seamless_clone(&src, &solid_mask(16, 16), &dest, Point::new(20, 20), &CloneParams::default()).unwrap();
        assert_eq!(out, dest);
    }

    #[test]
    fn source_detail_survives_the_colour_shift() {
        // background 100 with a bright dot, pasted onto a flat 50 destination
        let mut src = FrameBuffer::filled(16, 16, 0x00_64_64_64);
        src.pixels[8 * 16 + 8] = 0x00_A0_A0_A0;
        let dest = FrameBuffer::filled(40, 40, 0x00_32_32_32);
        let out = seamless_clone(&src, &solid_mask(16, 16), &dest, Point::new(20, 20), &CloneParams::default()).unwrap();

        // patch spans 12..28, so the dot lands on (20, 20)
        assert_eq!(out.get(20, 20), Some(0x00_6E_6E_6E)); // 160 - 50
        assert_eq!(out.get(19, 20), Some(0x00_32_32_32));
        assert_eq!(out.get(24, 17), Some(0x00_32_32_32));
    }

    #[test]
    fn ring_matches_destination_and_outside_is_untouched() {
        let dest = FrameBuffer {
            width: 30,
            height: 30,
            pixels: (0..900u32).map(|i| (i % 30) << 16 | (i / 30) << 8 | 0x40).collect(),
        };
        let src = FrameBuffer::filled(10, 10, 0x00_FF_00_FF);
        let out = seamless_clone(&src, &feather_mask(10, 10), &dest, Point::new(15, 15), &CloneParams::default()).unwrap();

        // patch covers 10..20 on both axes
        for y in 0..30 {
            for x in 0..30 {
                let inside_interior = (11..19).contains(&x) && (11..19).contains(&y);
                if !inside_interior {
                    assert_eq!(out.get(x, y), dest.get(x, y), "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn smooth_destination_gradient_is_reproduced() {
        // a horizontal ramp is harmonic, so a flat patch must reproduce it
        let dest = FrameBuffer {
            width: 40,
            height: 20,
            pixels: (0..800u32).map(|i| {
                let v = 40 + 4 * (i % 40);
                v << 16 | v << 8 | v
            }).collect(),
        };
        let src = FrameBuffer::filled(12, 12, 0x00_10_10_10);
        let out = seamless_clone(&src, &solid_mask(12, 12), &dest, Point::new(20, 10), &CloneParams::default()).unwrap();
        for y in 4..16 {
            for x in 14..26 {
                let got = unpack(out.get(x, y).unwrap())[0] as i32;
                let want = unpack(dest.get(x, y).unwrap())[0] as i32;
                assert!((got - want).abs() <= 1, "({x},{y}) got {got} want {want}");
            }
        }
    }

    #[test]
    fn placement_past_the_edge_is_rejected() {
        let dest = FrameBuffer::filled(40, 40, GRAY);
        let src = FrameBuffer::filled(10, 10, GRAY);
        let err = seamless_clone(&src, &solid_mask(10, 10), &dest, Point::new(36, 20), &CloneParams::default());
        assert!(matches!(err, Err(Error::OutOfBounds { brush: 5, .. })));
    }

    #[test]
    fn mask_size_must_match_source() {
        let dest = FrameBuffer::filled(40, 40, GRAY);
        let src = FrameBuffer::filled(10, 10, GRAY);
        let err = seamless_clone(&src, &solid_mask(8, 8), &dest, Point::new(20, 20), &CloneParams::default());
        assert!(matches!(err, Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn empty_patch_returns_copy() {
        let dest = FrameBuffer::filled(8, 8, GRAY);
        let src = FrameBuffer { width: 0, height: 0, pixels: Vec::new() };
        let mask = FeatherMask { width: 0, height: 0, alpha: Vec::new() };
        let out = seamless_clone(&src, &mask, &dest, Point::new(0, 0), &CloneParams::default()).unwrap();
        assert_eq!(out, dest);
    }
}

// Region extraction for the healing brush.
// Visual expectation: nothing is drawn here; this cuts the square the user is
// pointing at out of the image and builds the soft-edged mask used to paste it.
use crate::error::Error;
use crate::types::{FeatherMask, FrameBuffer, Point};

/// Side length of the feather blur (5x5).
pub const FEATHER_TAPS: usize = 5;
/// Gaussian sigma a 5-tap kernel gets from 0.3 * ((k - 1) / 2 - 1) + 0.8.
pub const FEATHER_SIGMA: f32 = 1.1;

/// Fail unless `[c - brush, c + brush)` fits in a `width` x `height` image on both axes.
pub fn check_bounds(width: usize, height: usize, center: Point, brush: u32) -> Result<(), Error> {
    let b = brush as i64;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let fits = cx - b >= 0 && cy - b >= 0 && cx + b <= width as i64 && cy + b <= height as i64;
    if fits {
        Ok(())
    } else {
        Err(Error::OutOfBounds { center, brush, width, height })
    }
}

/// Cut the `(2 * brush) x (2 * brush)` square centred on `center` out of `image`
/// and build its feather mask.
pub fn extract(image: &FrameBuffer, center: Point, brush: u32) -> Result<(FrameBuffer, FeatherMask), Error> {
    check_bounds(image.width, image.height, center, brush)?;

    let side = 2 * brush as usize;
    let x0 = (center.x - brush as i32) as usize;
    let y0 = (center.y - brush as i32) as usize;

    let mut pixels = Vec::with_capacity(side * side);
    for y in y0..y0 + side {
        let row = y * image.width;
        pixels.extend_from_slice(&image.pixels[row + x0..row + x0 + side]);
    }

    let sub = FrameBuffer { width: side, height: side, pixels };
    let mask = feather_mask(side, side);
    Ok((sub, mask))
}

/// Full-opacity mask of the given size, blurred so the outer rows/columns taper off.
pub fn feather_mask(width: usize, height: usize) -> FeatherMask {
    let solid = vec![1.0_f32; width * height];
    let kernel = gaussian_kernel(FEATHER_TAPS, FEATHER_SIGMA);
    let alpha = blur_separable(&solid, width, height, &kernel);
    FeatherMask { width, height, alpha }
}

/// 1-D Gaussian taps normalised to sum 1.
fn gaussian_kernel(taps: usize, sigma: f32) -> Vec<f32> {
    let r = (taps / 2) as i32;
    let s2 = 2.0 * sigma * sigma;
    let mut k: Vec<f32> = (-r..=r).map(|x| (-((x * x) as f32) / s2).exp()).collect();
    let sum: f32 = k.iter().sum();
    for w in &mut k {
        *w /= sum;
    }
    k
}

/// Horizontal then vertical pass. Samples outside the buffer count as 0, which is
/// what pulls the border below full opacity.
fn blur_separable(src: &[f32], w: usize, h: usize, kernel: &[f32]) -> Vec<f32> {
    let r = (kernel.len() / 2) as i32;
    let (wi, hi) = (w as i32, h as i32);

    /* ---- Pass 1: rows into tmp ---- */
    let mut tmp = vec![0.0_f32; w * h];
    for y in 0..hi {
        let row = (y * wi) as usize;
        for x in 0..wi {
            let mut acc = 0.0;
            for (i, k) in kernel.iter().enumerate() {
                let sx = x + i as i32 - r;
                if sx >= 0 && sx < wi {
                    acc += k * src[row + sx as usize];
                }
            }
            tmp[row + x as usize] = acc;
        }
    }

    /* ---- Pass 2: columns into out ---- */
    let mut out = vec![0.0_f32; w * h];
    for x in 0..wi {
        for y in 0..hi {
            let mut acc = 0.0;
            for (i, k) in kernel.iter().enumerate() {
                let sy = y + i as i32 - r;
                if sy >= 0 && sy < hi {
                    acc += k * tmp[(sy * wi + x) as usize];
                }
            }
            out[(y * wi + x) as usize] = acc.clamp(0.0, 1.0);
        }
    }
    out
}

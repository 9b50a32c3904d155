// Linear-light mixing for the feather envelope, using table lookups instead of powf.
// Visual: the soft edge of a heal fades without the dark halo an sRGB-space mix leaves.
use std::sync::OnceLock;

use crate::types::{pack, unpack};

/// Steps used to quantise linear light on the way back to sRGB.
const LINEAR_STEPS: usize = 4096;

pub struct GammaLut {
    to_linear: [f32; 256],
    to_srgb: [u8; LINEAR_STEPS],
}

/// Shared tables, built on first use.
pub fn lut() -> &'static GammaLut {
    static LUT: OnceLock<GammaLut> = OnceLock::new();
    LUT.get_or_init(GammaLut::build)
}

impl GammaLut {
    fn build() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; LINEAR_STEPS];
        let top = (LINEAR_STEPS - 1) as f32;
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / top;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb[idx]
    }

    /// `a * top + (1 - a) * base` per channel, in linear light.
    /// Equal inputs and the ends of the range come back untouched.
    pub fn mix(&self, base: u32, top: u32, a: f32) -> u32 {
        if a <= 0.0 || base == top {
            return base;
        }
        if a >= 1.0 {
            return top;
        }
        let (b, t) = (unpack(base), unpack(top));
        let inv = 1.0 - a;
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = self.srgb(a * self.linear(t[c]) + inv * self.linear(b[c]));
        }
        pack(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_survive_the_round_trip() {
        let lut = lut();
        assert_eq!(lut.srgb(lut.linear(0)), 0);
        assert_eq!(lut.srgb(lut.linear(255)), 255);
        assert_eq!(lut.srgb(lut.linear(128)), 128);
    }

    #[test]
    fn mix_respects_the_weight_ends() {
        let lut = lut();
        assert_eq!(lut.mix(0x00_10_20_30, 0x00_F0_E0_D0, 0.0), 0x00_10_20_30);
        assert_eq!(lut.mix(0x00_10_20_30, 0x00_F0_E0_D0, 1.0), 0x00_F0_E0_D0);
        assert_eq!(lut.mix(0x00_55_55_55, 0x00_55_55_55, 0.4), 0x00_55_55_55);
    }

    #[test]
    fn half_mix_of_black_and_white_is_brighter_than_srgb_midpoint() {
        let lut = lut();
        let mid = unpack(lut.mix(0x00_00_00_00, 0x00_FF_FF_FF, 0.5));
        // linear 0.5 is ~188 in sRGB
        assert!(mid.iter().all(|&c| (185..=190).contains(&c)), "{mid:?}");
    }
}

use rayon::prelude::*;

use crate::foundation::error::FrostpaneResult;
use crate::foundation::pixels::{PixelBuffer, pack, unpack};

/// Software radius bounds. Radii are truncated to an integer and clamped into
/// this range; cost grows linearly with radius and the visual return past 10
/// is negligible at the optimizer's working resolutions.
pub const SOFTWARE_MIN_RADIUS: u32 = 1;
pub const SOFTWARE_MAX_RADIUS: u32 = 10;

/// Two-pass separable box blur over packed ARGB pixels.
///
/// Radii below 1 apply no blur and return an unmodified copy. Each pass
/// averages the four channels independently with integer division over a
/// window clamped to the row/column, so edge pixels use a smaller asymmetric
/// window instead of wrapping. The horizontal pass writes to a temporary
/// buffer and the vertical pass reads from it; source pixels are never
/// overwritten mid-pass.
pub fn box_blur(src: &PixelBuffer, radius: f32) -> FrostpaneResult<PixelBuffer> {
    if radius < 1.0 {
        return Ok(src.clone());
    }
    let radius = (radius as u32).clamp(SOFTWARE_MIN_RADIUS, SOFTWARE_MAX_RADIUS) as usize;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let pixels = src.pixels();

    let mut tmp = vec![0u32; pixels.len()];
    tmp.par_chunks_exact_mut(w).enumerate().for_each(|(y, row)| {
        let src_row = &pixels[y * w..(y + 1) * w];
        blur_row(src_row, row, radius);
    });

    let mut out = vec![0u32; pixels.len()];
    out.par_chunks_exact_mut(w).enumerate().for_each(|(y, row)| {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(h - 1);
        let count = (hi - lo + 1) as u32;
        for (x, out_px) in row.iter_mut().enumerate() {
            let mut acc = [0u32; 4];
            for src_y in lo..=hi {
                let channels = unpack(tmp[src_y * w + x]);
                for (slot, ch) in acc.iter_mut().zip(channels) {
                    *slot += ch;
                }
            }
            *out_px = pack(acc[0] / count, acc[1] / count, acc[2] / count, acc[3] / count);
        }
    });

    PixelBuffer::from_argb(src.width(), src.height(), out)
}

fn blur_row(src: &[u32], dst: &mut [u32], radius: usize) {
    let w = src.len();
    for (x, out_px) in dst.iter_mut().enumerate() {
        let lo = x.saturating_sub(radius);
        let hi = (x + radius).min(w - 1);
        let count = (hi - lo + 1) as u32;
        let mut acc = [0u32; 4];
        for &px in &src[lo..=hi] {
            let channels = unpack(px);
            for (slot, ch) in acc.iter_mut().zip(channels) {
                *slot += ch;
            }
        }
        *out_px = pack(acc[0] / count, acc[1] / count, acc[2] / count, acc[3] / count);
    }
}

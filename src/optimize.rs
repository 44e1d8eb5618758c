use image::imageops::{self, FilterType};

use crate::foundation::error::FrostpaneResult;
use crate::foundation::pixels::PixelBuffer;

/// Hard ceiling on pixels fed to the blur paths. Blur cost is roughly linear
/// in pixel count x radius, so bounding the count bounds worst-case latency.
pub const MAX_BLUR_PIXELS: u64 = 1 << 20;

/// Above this edge length a buffer is downscaled even when under the ceiling.
pub const SOFT_MAX_DIMENSION: u32 = 512;

/// Fixed scale applied on the soft-threshold path.
pub const SOFT_DOWNSCALE: f64 = 0.5;

/// Downscale `buffer` when it is too large to blur cheaply.
///
/// Buffers over [`MAX_BLUR_PIXELS`] are scaled uniformly by
/// `sqrt(ceiling / total)`; buffers with an edge over [`SOFT_MAX_DIMENSION`]
/// are scaled by [`SOFT_DOWNSCALE`]. Small buffers pass through unchanged,
/// without a copy. Resampling uses a triangle filter so the downscale does not
/// alias through the blur.
pub fn optimize_for_blur(buffer: PixelBuffer) -> FrostpaneResult<PixelBuffer> {
    let total = buffer.pixel_count() as u64;
    if total > MAX_BLUR_PIXELS {
        let scale = (MAX_BLUR_PIXELS as f64 / total as f64).sqrt();
        return resample(buffer, scale);
    }

    if buffer.width() > SOFT_MAX_DIMENSION || buffer.height() > SOFT_MAX_DIMENSION {
        return resample(buffer, SOFT_DOWNSCALE);
    }

    Ok(buffer)
}

fn resample(buffer: PixelBuffer, scale: f64) -> FrostpaneResult<PixelBuffer> {
    let new_w = ((f64::from(buffer.width()) * scale) as u32).max(1);
    let new_h = ((f64::from(buffer.height()) * scale) as u32).max(1);
    tracing::debug!(
        from_w = buffer.width(),
        from_h = buffer.height(),
        to_w = new_w,
        to_h = new_h,
        "downscaling before blur"
    );
    let image = buffer.to_rgba_image()?;
    let scaled = imageops::resize(&image, new_w, new_h, FilterType::Triangle);
    PixelBuffer::from_rgba_image(scaled)
}

use image::imageops;

use crate::blur::kernel::box_blur;
use crate::foundation::error::FrostpaneResult;
use crate::foundation::pixels::PixelBuffer;

/// Radius bounds accepted by the filtered primitive.
pub const FILTERED_MIN_RADIUS: f32 = 1.0;
pub const FILTERED_MAX_RADIUS: f32 = 25.0;

/// A blur implementation. Callers guarantee `radius > 0`; each strategy clamps
/// the radius into its own supported range.
pub trait BlurStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn blur(&self, src: &PixelBuffer, radius: f32) -> FrostpaneResult<PixelBuffer>;
}

/// Software box-average blur.
///
/// Clamps the radius to `[1, 10]` even though the filtered path accepts up to
/// 25: the box kernel's cost grows linearly with radius while the added blur
/// past 10 is barely visible, so the fallback trades top-end radius for
/// bounded cost. This is a deliberate divergence from the requested radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareBlur;

impl BlurStrategy for SoftwareBlur {
    fn name(&self) -> &'static str {
        "software-box"
    }

    fn blur(&self, src: &PixelBuffer, radius: f32) -> FrostpaneResult<PixelBuffer> {
        box_blur(src, radius)
    }
}

/// Gaussian blur through the `image` filter pipeline, standing in for a
/// platform-accelerated primitive. Accepts the full `[1, 25]` radius range.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilteredBlur;

impl BlurStrategy for FilteredBlur {
    fn name(&self) -> &'static str {
        "filtered-gaussian"
    }

    fn blur(&self, src: &PixelBuffer, radius: f32) -> FrostpaneResult<PixelBuffer> {
        let radius = radius.clamp(FILTERED_MIN_RADIUS, FILTERED_MAX_RADIUS);
        let image = src.to_rgba_image()?;
        let blurred = imageops::blur(&image, radius / 2.0);
        PixelBuffer::from_rgba_image(blurred)
    }
}

/// Picks the blur path: the probed primary strategy first, the software kernel
/// on any primary failure. Fallback is silent; a primary failure never reaches
/// the caller.
pub struct BlurExecutor {
    primary: Option<Box<dyn BlurStrategy>>,
    fallback: SoftwareBlur,
}

impl BlurExecutor {
    /// Probe for the filtered primitive once at construction.
    pub fn new() -> Self {
        Self::with_primary(probe_filtered())
    }

    /// Build with an explicit primary strategy (or none, forcing software).
    pub fn with_primary(primary: Option<Box<dyn BlurStrategy>>) -> Self {
        Self {
            primary,
            fallback: SoftwareBlur,
        }
    }

    pub fn software_only() -> Self {
        Self::with_primary(None)
    }

    /// Blur `src` by `radius`. Non-positive radii skip both paths and return
    /// an unmodified copy.
    pub fn execute(&self, src: &PixelBuffer, radius: f32) -> FrostpaneResult<PixelBuffer> {
        if radius <= 0.0 {
            return Ok(src.clone());
        }

        if let Some(primary) = &self.primary {
            match primary.blur(src, radius) {
                Ok(out) => return Ok(out),
                Err(err) => {
                    tracing::debug!(
                        strategy = primary.name(),
                        error = %err,
                        "primary blur failed, retrying on software kernel"
                    );
                }
            }
        }

        self.fallback.blur(src, radius)
    }
}

impl Default for BlurExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn probe_filtered() -> Option<Box<dyn BlurStrategy>> {
    Some(Box::new(FilteredBlur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::FrostpaneError;

    struct AlwaysFails;

    impl BlurStrategy for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        fn blur(&self, _src: &PixelBuffer, _radius: f32) -> FrostpaneResult<PixelBuffer> {
            Err(FrostpaneError::blur("simulated primitive failure"))
        }
    }

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for (i, px) in buffer.pixels_mut().iter_mut().enumerate() {
            *px = 0xFF00_0000 | ((i as u32 % 256) << 16);
        }
        buffer
    }

    #[test]
    fn non_positive_radius_skips_both_paths() {
        let src = gradient(8, 8);
        let executor = BlurExecutor::with_primary(Some(Box::new(AlwaysFails)));
        let out = executor.execute(&src, 0.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn primary_failure_falls_back_to_software() {
        let src = gradient(16, 16);
        let executor = BlurExecutor::with_primary(Some(Box::new(AlwaysFails)));
        let out = executor.execute(&src, 4.0).unwrap();
        let expected = SoftwareBlur.blur(&src, 4.0).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn filtered_path_produces_blur() {
        let mut src = PixelBuffer::new(9, 9).unwrap();
        src.pixels_mut()[4 * 9 + 4] = 0xFFFF_FFFF;
        let out = FilteredBlur.blur(&src, 3.0).unwrap();
        let lit = out.pixels().iter().filter(|&&p| p != 0).count();
        assert!(lit > 1, "blur should spread the single lit pixel");
    }

    #[test]
    fn software_only_executor_blurs() {
        let src = gradient(16, 4);
        let executor = BlurExecutor::software_only();
        let out = executor.execute(&src, 2.0).unwrap();
        assert_eq!((out.width(), out.height()), (16, 4));
        assert_ne!(out, src);
    }
}

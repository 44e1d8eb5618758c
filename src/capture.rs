use crate::foundation::error::{FrostpaneError, FrostpaneResult};
use crate::foundation::pixels::PixelBuffer;

/// Supplies snapshots of the fully composited root frame.
///
/// Implemented by the view-integration layer; the engine never talks to the
/// windowing system directly.
pub trait FrameSource {
    /// Snapshot the full root frame. Later scene changes must not affect the
    /// returned buffer.
    fn root_frame(&self) -> FrostpaneResult<PixelBuffer>;
}

/// Region of the root frame in root pixel coordinates. The origin may be
/// negative (a view partially above/left of the root); it is clamped to the
/// frame bounds at capture time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CaptureRegion {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Snapshot the pixels behind `region`.
///
/// Fails with a capture error when the region has non-positive dimensions,
/// when the source cannot produce a frame, or when the clamped region falls
/// entirely outside the root frame. The full-root intermediate buffer is
/// dropped before returning.
pub fn capture_region(
    source: &dyn FrameSource,
    region: CaptureRegion,
) -> FrostpaneResult<PixelBuffer> {
    if region.width <= 0 || region.height <= 0 {
        return Err(FrostpaneError::capture(
            "capture region must have positive dimensions",
        ));
    }

    let root = source.root_frame()?;
    let root_w = i64::from(root.width());
    let root_h = i64::from(root.height());

    let left = i64::from(region.x).clamp(0, root_w);
    let top = i64::from(region.y).clamp(0, root_h);
    let right = (i64::from(region.x) + i64::from(region.width)).clamp(0, root_w);
    let bottom = (i64::from(region.y) + i64::from(region.height)).clamp(0, root_h);

    if right <= left || bottom <= top {
        return Err(FrostpaneError::capture(
            "capture region lies outside the root frame",
        ));
    }

    let out_w = (right - left) as usize;
    let out_h = (bottom - top) as usize;
    let src = root.pixels();
    let stride = root.width() as usize;

    let mut pixels = Vec::with_capacity(out_w * out_h);
    for row in top as usize..bottom as usize {
        let start = row * stride + left as usize;
        pixels.extend_from_slice(&src[start..start + out_w]);
    }

    PixelBuffer::from_argb(out_w as u32, out_h as u32, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::pixels::pack;

    /// Root frame whose pixel at (x, y) encodes its own coordinates.
    struct CoordinateFrame {
        width: u32,
        height: u32,
    }

    impl FrameSource for CoordinateFrame {
        fn root_frame(&self) -> FrostpaneResult<PixelBuffer> {
            let mut buffer = PixelBuffer::new(self.width, self.height)?;
            for y in 0..self.height {
                for x in 0..self.width {
                    buffer.pixels_mut()[(y * self.width + x) as usize] = pack(0xff, x, y, 0);
                }
            }
            Ok(buffer)
        }
    }

    struct FailingFrame;

    impl FrameSource for FailingFrame {
        fn root_frame(&self) -> FrostpaneResult<PixelBuffer> {
            Err(FrostpaneError::capture("surface not readable"))
        }
    }

    #[test]
    fn rejects_non_positive_region() {
        let frame = CoordinateFrame {
            width: 8,
            height: 8,
        };
        assert!(capture_region(&frame, CaptureRegion::new(0, 0, 0, 4)).is_err());
        assert!(capture_region(&frame, CaptureRegion::new(0, 0, 4, -1)).is_err());
    }

    #[test]
    fn crops_the_requested_region() {
        let frame = CoordinateFrame {
            width: 16,
            height: 16,
        };
        let out = capture_region(&frame, CaptureRegion::new(3, 5, 4, 2)).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.pixels()[0], pack(0xff, 3, 5, 0));
        assert_eq!(out.pixels()[7], pack(0xff, 6, 6, 0));
    }

    #[test]
    fn clamps_negative_origin_to_frame_bounds() {
        let frame = CoordinateFrame {
            width: 8,
            height: 8,
        };
        let out = capture_region(&frame, CaptureRegion::new(-2, -3, 5, 5)).unwrap();
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(out.pixels()[0], pack(0xff, 0, 0, 0));
    }

    #[test]
    fn region_fully_outside_frame_is_a_capture_error() {
        let frame = CoordinateFrame {
            width: 8,
            height: 8,
        };
        let err = capture_region(&frame, CaptureRegion::new(20, 20, 4, 4)).unwrap_err();
        assert!(matches!(err, FrostpaneError::Capture(_)));
    }

    #[test]
    fn source_failure_propagates() {
        let err = capture_region(&FailingFrame, CaptureRegion::new(0, 0, 4, 4)).unwrap_err();
        assert!(err.to_string().contains("surface not readable"));
    }
}

use image::RgbaImage;

use crate::foundation::error::{FrostpaneError, FrostpaneResult};

/// Packed 32-bit ARGB pixel buffer, row-major.
///
/// Bit layout per pixel is `a << 24 | r << 16 | g << 8 | b`, straight alpha.
/// `pixels.len() == width * height` holds by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Zero-filled (fully transparent) buffer.
    pub fn new(width: u32, height: u32) -> FrostpaneResult<Self> {
        let len = checked_pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u32; len],
        })
    }

    /// Wrap an existing packed ARGB pixel array.
    pub fn from_argb(width: u32, height: u32, pixels: Vec<u32>) -> FrostpaneResult<Self> {
        let len = checked_pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(FrostpaneError::validation(
                "PixelBuffer expects pixels matching width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Backing storage size in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * 4
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Convert to an `image` RGBA buffer for resampling/filtering.
    pub fn to_rgba_image(&self) -> FrostpaneResult<RgbaImage> {
        let mut bytes = Vec::with_capacity(self.byte_size());
        for &px in &self.pixels {
            let [a, r, g, b] = unpack(px);
            bytes.extend_from_slice(&[r as u8, g as u8, b as u8, a as u8]);
        }
        RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or_else(|| FrostpaneError::allocation("rgba image container mismatch"))
    }

    /// Convert back from an `image` RGBA buffer.
    pub fn from_rgba_image(image: RgbaImage) -> FrostpaneResult<Self> {
        let (width, height) = image.dimensions();
        let raw = image.into_raw();
        let mut pixels = Vec::with_capacity(checked_pixel_count(width, height)?);
        for chunk in raw.chunks_exact(4) {
            pixels.push(pack(
                u32::from(chunk[3]),
                u32::from(chunk[0]),
                u32::from(chunk[1]),
                u32::from(chunk[2]),
            ));
        }
        Self::from_argb(width, height, pixels)
    }
}

/// Straight-alpha ARGB color, used for material tints.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Argb8 {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb8 {
    pub fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub fn to_packed(self) -> u32 {
        pack(
            u32::from(self.a),
            u32::from(self.r),
            u32::from(self.g),
            u32::from(self.b),
        )
    }

    pub fn from_packed(px: u32) -> Self {
        let [a, r, g, b] = unpack(px);
        Self {
            a: a as u8,
            r: r as u8,
            g: g as u8,
            b: b as u8,
        }
    }
}

pub(crate) fn checked_pixel_count(width: u32, height: u32) -> FrostpaneResult<usize> {
    if width == 0 || height == 0 {
        return Err(FrostpaneError::validation(
            "PixelBuffer dimensions must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| FrostpaneError::allocation("pixel buffer size overflow"))
}

/// Split a packed pixel into `[a, r, g, b]` channel values.
pub(crate) fn unpack(px: u32) -> [u32; 4] {
    [(px >> 24) & 0xff, (px >> 16) & 0xff, (px >> 8) & 0xff, px & 0xff]
}

/// Repack `[a, r, g, b]` channel values into a pixel.
pub(crate) fn pack(a: u32, r: u32, g: u32, b: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argb_rejects_length_mismatch() {
        let err = PixelBuffer::from_argb(2, 2, vec![0u32; 3]).unwrap_err();
        assert!(err.to_string().contains("width*height"));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(PixelBuffer::new(0, 4).is_err());
        assert!(PixelBuffer::new(4, 0).is_err());
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let px = pack(0x80, 0x10, 0x20, 0x30);
        assert_eq!(px, 0x8010_2030);
        assert_eq!(unpack(px), [0x80, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn rgba_image_roundtrip_preserves_pixels() {
        let buffer = PixelBuffer::from_argb(2, 1, vec![0x8010_2030, 0xFF40_5060]).unwrap();
        let image = buffer.to_rgba_image().unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0x10, 0x20, 0x30, 0x80]);
        let back = PixelBuffer::from_rgba_image(image).unwrap();
        assert_eq!(back, buffer);
    }

    #[test]
    fn argb8_packed_roundtrip() {
        let c = Argb8::new(200, 1, 2, 3);
        assert_eq!(Argb8::from_packed(c.to_packed()), c);
    }
}

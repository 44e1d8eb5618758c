use crate::foundation::pixels::{Argb8, PixelBuffer, pack, unpack};

/// Composite a solid tint color over blurred pixels, src-over with straight
/// alpha. A fully transparent tint is a no-op.
pub fn apply_tint(buffer: &mut PixelBuffer, tint: Argb8) {
    if tint.a == 0 {
        return;
    }

    let sa = u16::from(tint.a);
    let inv = 255 - sa;
    let src = [u16::from(tint.r), u16::from(tint.g), u16::from(tint.b)];

    for px in buffer.pixels_mut() {
        let [da, dr, dg, db] = unpack(*px);
        let a = (tint.a).saturating_add(mul_div255(da as u16, inv));
        let r = mul_div255(src[0], sa).saturating_add(mul_div255(dr as u16, inv));
        let g = mul_div255(src[1], sa).saturating_add(mul_div255(dg as u16, inv));
        let b = mul_div255(src[2], sa).saturating_add(mul_div255(db as u16, inv));
        *px = pack(
            u32::from(a),
            u32::from(r),
            u32::from(g),
            u32::from(b),
        );
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

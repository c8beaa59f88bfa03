use ev_core::BasicImage;

use crate::arith::copy;

fn min_max(img: &BasicImage) -> (u8, u8) {
    img.data()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[inline]
fn stretch(v: u8, lo: u8, scale: f32, bottom: u8) -> u8 {
    (f32::from(v - lo) * scale + 0.5 + f32::from(bottom)) as u8
}

/// Linearly maps the observed `[min, max]` of `src` onto `[bottom, top]`.
///
/// A flat image is copied unchanged.
pub fn contrast_stretch(src: &BasicImage, dst: &mut BasicImage, bottom: u8, top: u8) {
    debug_assert!(src.same_dims(dst));
    let (lo, hi) = min_max(src);
    if lo >= hi {
        copy(src, dst);
        return;
    }

    let scale = (f32::from(top) - f32::from(bottom)) / f32::from(hi - lo);
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = stretch(s, lo, scale, bottom);
    }
}

/// Same mapping as [`contrast_stretch`], through a table built over
/// `[min, max]` only.
pub fn contrast_stretch_fast(src: &BasicImage, dst: &mut BasicImage, bottom: u8, top: u8) {
    debug_assert!(src.same_dims(dst));
    let (lo, hi) = min_max(src);
    if lo >= hi {
        copy(src, dst);
        return;
    }

    let scale = (f32::from(top) - f32::from(bottom)) / f32::from(hi - lo);
    let mut lut = [0u8; 256];
    for v in lo..=hi {
        lut[usize::from(v)] = stretch(v, lo, scale, bottom);
    }

    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = lut[usize::from(s)];
    }
}

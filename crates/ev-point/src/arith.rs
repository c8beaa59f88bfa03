use ev_core::BasicImage;

/// Copies pixels and the content tag of `src` into `dst`.
pub fn copy(src: &BasicImage, dst: &mut BasicImage) {
    debug_assert!(src.same_dims(dst));
    dst.data_mut().copy_from_slice(src.data());
    dst.set_content(src.content());
}

pub fn erase(img: &mut BasicImage) {
    img.data_mut().fill(0);
}

/// `dst = min(dst + src, 255)`.
pub fn add(src: &BasicImage, dst: &mut BasicImage) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = d.saturating_add(s);
    }
}

/// `dst = max(dst - src, 0)`.
pub fn subtract(src: &BasicImage, dst: &mut BasicImage) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = d.saturating_sub(s);
    }
}

/// `dst = min(dst * src, 255)`.
pub fn multiply(src: &BasicImage, dst: &mut BasicImage) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = d.saturating_mul(s);
    }
}

pub fn sum(img: &BasicImage) -> u64 {
    img.data().iter().map(|&v| u64::from(v)).sum()
}

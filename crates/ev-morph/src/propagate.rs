use ev_core::{BasicImage, Connectivity, neighbor_count};

/// Marks pixels found to be connected to the image border.
pub(crate) const MARK: u8 = 2;

/// Copies `src` into `dst`, marking border pixels that satisfy `seed`.
pub(crate) fn seed_border(src: &BasicImage, dst: &mut BasicImage, seed: impl Fn(u8) -> bool) {
    debug_assert!(src.same_dims(dst));
    let (w, h) = src.dims();
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = dst.row_mut(y);
        for (x, (d, &s)) in dst_row.iter_mut().zip(src_row).enumerate() {
            let on_border = y == 0 || x == 0 || y == h - 1 || x == w - 1;
            *d = if on_border && seed(s) { MARK } else { s };
        }
    }
}

/// Spreads [`MARK`] into every `candidate` pixel touching a marked pixel.
///
/// Alternates forward and backward raster sweeps until a pair of sweeps
/// changes nothing. Returns the number of sweep pairs.
pub(crate) fn propagate_mark(img: &mut BasicImage, candidate: u8, conn: Connectivity) -> usize {
    let (w, h) = img.dims();
    let mut pairs = 0;
    loop {
        let mut changed = false;
        for y in 0..h {
            for x in 0..w {
                changed |= mark_if_touching(img, x, y, candidate, conn);
            }
        }
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                changed |= mark_if_touching(img, x, y, candidate, conn);
            }
        }

        pairs += 1;
        if !changed {
            return pairs;
        }
    }
}

#[inline]
fn mark_if_touching(
    img: &mut BasicImage,
    x: usize,
    y: usize,
    candidate: u8,
    conn: Connectivity,
) -> bool {
    if img.pixel(x, y) != candidate || neighbor_count(img, x, y, MARK, conn) == 0 {
        return false;
    }
    img.set_pixel(x, y, MARK);
    true
}

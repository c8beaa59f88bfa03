use ev_core::{BasicImage, Connectivity, Content, Error, Image, lowest_nonzero_neighbor};
use log::debug;

/// Foreground pixel that has not received a label yet.
const UNLABELED: u32 = u32::MAX;

/// Labels the connected foreground (`1`) components of `src`.
///
/// Labels in `dst` are dense, `1..=N`, numbered in raster order of each
/// component's first pixel. Returns `N`.
///
/// Labels are found by relaxation: alternating forward and backward sweeps
/// give each unlabeled pixel its lowest labeled neighbor (or a fresh label)
/// and lower every labeled pixel to its lowest neighbor, until a pair of
/// sweeps changes nothing.
pub fn label_blobs(
    src: &BasicImage,
    dst: &mut BasicImage,
    conn: Connectivity,
) -> Result<u8, Error> {
    debug_assert!(src.same_dims(dst));
    let (w, h) = src.dims();
    let work: Vec<u32> = src
        .data()
        .iter()
        .map(|&v| if v == 1 { UNLABELED } else { 0 })
        .collect();
    let mut work = Image::from_vec(w, h, work)?;

    let mut next = 1u32;
    let mut pairs = 0usize;
    loop {
        let mut changed = false;
        for y in 0..h {
            for x in 0..w {
                changed |= relax(&mut work, x, y, conn, &mut next);
            }
        }
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                changed |= relax(&mut work, x, y, conn, &mut next);
            }
        }

        pairs += 1;
        if !changed {
            break;
        }
    }

    let count = compact(&mut work, next);
    debug!(
        "label_blobs: {count} blobs, {} provisional labels, {pairs} sweep pairs",
        next - 1
    );
    if count > usize::from(u8::MAX) {
        return Err(Error::LabelOverflow { count });
    }

    for (d, &v) in dst.data_mut().iter_mut().zip(work.data()) {
        *d = v as u8;
    }
    dst.set_content(Content::Labeled);
    Ok(count as u8)
}

#[inline]
fn relax(work: &mut Image<u32>, x: usize, y: usize, conn: Connectivity, next: &mut u32) -> bool {
    let v = work.pixel(x, y);
    if v == 0 {
        return false;
    }

    let lowest = lowest_nonzero_neighbor(work, x, y, conn).filter(|&l| l != UNLABELED);
    if v == UNLABELED {
        let label = lowest.unwrap_or_else(|| {
            let fresh = *next;
            *next += 1;
            fresh
        });
        work.set_pixel(x, y, label);
        return true;
    }

    match lowest {
        Some(l) if l < v => {
            work.set_pixel(x, y, l);
            true
        }
        _ => false,
    }
}

/// Renumbers surviving labels to `1..=N` by first raster occurrence.
fn compact(work: &mut Image<u32>, next: u32) -> usize {
    let mut remap = vec![0u32; next as usize];
    let mut count = 0u32;
    for v in work.data_mut() {
        if *v == 0 {
            continue;
        }
        let slot = &mut remap[*v as usize];
        if *slot == 0 {
            count += 1;
            *slot = count;
        }
        *v = *slot;
    }
    count as usize
}

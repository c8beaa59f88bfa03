use ev_core::{BasicImage, Connectivity, Content, neighbor_count};

/// Keeps only the boundary pixels of binary blobs.
///
/// A foreground pixel with no background neighbor is interior and is cleared.
/// The neighbor test uses the connectivity opposite to `conn`: asking for a
/// 4-connected outline tests all 8 neighbors, and vice versa.
pub fn binary_edge_detect(src: &BasicImage, dst: &mut BasicImage, conn: Connectivity) {
    debug_assert!(src.same_dims(dst));
    let test = conn.opposite();
    let (w, h) = src.dims();
    for y in 0..h {
        for x in 0..w {
            let v = src.pixel(x, y);
            let interior = v == 1 && neighbor_count(src, x, y, 0, test) == 0;
            dst.set_pixel(x, y, if interior { 0 } else { v });
        }
    }
    dst.set_content(Content::Binary);
}

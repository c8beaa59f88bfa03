use ev_core::{BasicImage, Connectivity, Content};
use ev_point::select_to_value_in_place;
use log::debug;

use crate::propagate::{MARK, propagate_mark, seed_border};

/// Clears every foreground blob that touches the image border.
pub fn remove_border_blobs(src: &BasicImage, dst: &mut BasicImage, conn: Connectivity) {
    seed_border(src, dst, |v| v == 1);
    let pairs = propagate_mark(dst, 1, conn);
    debug!("remove_border_blobs: {pairs} sweep pairs");

    select_to_value_in_place(dst, MARK, 0);
    dst.set_content(Content::Binary);
}

/// Sets every background region not connected to the border to 1.
pub fn fill_holes(src: &BasicImage, dst: &mut BasicImage, conn: Connectivity) {
    seed_border(src, dst, |v| v != 1);
    let pairs = propagate_mark(dst, 0, conn);
    debug!("fill_holes: {pairs} sweep pairs");

    select_to_value_in_place(dst, 0, 1);
    select_to_value_in_place(dst, MARK, 0);
    dst.set_content(Content::Binary);
}

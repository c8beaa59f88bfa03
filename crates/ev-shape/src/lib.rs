//! Shape measurements on labeled images.
//!
//! Every query scans the whole image for pixels equal to one label. Queries
//! for a label with no pixels return [`ev_core::Error::EmptyBlob`] instead of
//! dividing by a zero area.
//!
//! Turning these numbers into shape classes (square, circle, ...) is left to
//! the caller; [`BlobInfo::form_factor`] is the usual starting point.

mod analyse;
mod moments;
mod select;

pub use analyse::{BlobInfo, analyse_blob};
pub use moments::{centroid, normalized_central_moment};
pub use select::{Corners, extreme_corners, largest_blob};

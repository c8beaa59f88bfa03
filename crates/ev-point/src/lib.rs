//! Per-pixel operators on basic images.
//!
//! Two-image operators take a read-only `src` and a caller-owned `dst` of the
//! same dimensions. The arithmetic operators ([`add`], [`subtract`],
//! [`multiply`]) read `dst` as their second operand and overwrite it with
//! the result. All arithmetic saturates to `0..=255`.
//!
//! Contrast stretching maps the observed `[min, max]` range linearly to a
//! target range with round-half-up; [`contrast_stretch_fast`] produces the
//! same result from a 256-entry lookup table.

mod arith;
mod contrast;
mod rotate;
mod select;

pub use arith::{add, copy, erase, multiply, subtract, sum};
pub use contrast::{contrast_stretch, contrast_stretch_fast};
pub use rotate::{Rotate180, rotate180};
pub use select::{
    invert, invert_in_place, select_to_value, select_to_value_in_place, threshold,
    threshold_in_place,
};

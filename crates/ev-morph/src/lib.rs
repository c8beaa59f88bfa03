//! Connectivity operators on binary images.
//!
//! Inputs are binary: `1` is foreground and every other value is background.
//! [`remove_border_blobs`] and [`fill_holes`] mark border-connected pixels
//! with a sentinel and spread it with alternating forward and backward raster
//! sweeps until nothing changes. [`label_blobs`] uses the same sweep scheme
//! to settle component labels.
//!
//! Connectivity options:
//! - [`Connectivity::C4`]: axis-aligned neighbors only.
//! - [`Connectivity::C8`]: includes diagonals.

mod border;
mod edge;
mod label;
mod propagate;

pub use border::{fill_holes, remove_border_blobs};
pub use edge::binary_edge_detect;
pub use ev_core::Connectivity;
pub use label::label_blobs;

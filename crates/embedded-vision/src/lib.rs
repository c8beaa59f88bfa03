//! Umbrella crate for the `embedded-vision` workspace.
//!
//! Re-exports the image container and every operator crate, so a pipeline
//! can be written against a single dependency.

pub use ev_core::*;
pub use ev_filter::*;
pub use ev_morph::*;
pub use ev_point::*;
pub use ev_shape::*;
pub use ev_threshold::*;

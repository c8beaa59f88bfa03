//! Foundational types for the embedded-vision operators.
//!
//! ## Images
//! [`Image<T>`] owns a contiguous row-major buffer of exactly
//! `width * height` pixels. Coordinates are `(x, y)` = `(column, row)`.
//! [`BasicImage`] (`Image<u8>`) is what every operator works on; the other
//! pixel encodings exist only to be reduced with [`convert_to_basic`].
//!
//! Each image carries a [`Content`] tag describing how its values are meant
//! to be read (intensity, binary `{0, 1}` or labeled `{0..N}`). Operators
//! that produce binary or labeled output set the tag on their destination.
//!
//! ## Allocation
//! Basic images are created through a [`PixelAllocator`]. [`HeapAllocator`]
//! is the default; [`PoolAllocator`] hands out pre-reserved, frame-sized
//! slots for targets where heap fragmentation is not acceptable.
//!
//! ## Neighborhoods
//! [`neighbor_count`] and [`lowest_nonzero_neighbor`] look at the 4- or
//! 8-connected neighbors of a pixel. Neighbors outside the image are never
//! visited.

mod alloc;
mod convert;
mod error;
mod image;
mod neighbor;
mod pixel;

pub use alloc::{HeapAllocator, PixelAllocator, PoolAllocator};
pub use convert::{convert_to_basic, to_basic};
pub use error::Error;
pub use image::{BasicImage, Image, ImageView};
pub use neighbor::{Connectivity, lowest_nonzero_neighbor, neighbor_count, neighbors};
pub use pixel::{Content, LUMA_WEIGHTS, Pixel, PixelType, Rgb565, Rgb888};

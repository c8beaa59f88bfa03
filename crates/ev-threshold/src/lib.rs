//! Histogram construction and global threshold selection.
//!
//! Both selectors compute a single level `T` from the image histogram and
//! binarize with [`ev_point::threshold`]. [`Brightness::Dark`] keeps
//! `[0, T]` as foreground, [`Brightness::Bright`] keeps `[T, 255]`.

mod global;
mod histogram;

pub use global::{
    Brightness, otsu_level, threshold_otsu, threshold_two_means, two_means_level,
};
pub use histogram::{Histogram, histogram};

//! Nonlinear sliding-window filters.
//!
//! Every destination pixel is computed from the `n x n` source window centered
//! on it. Windows are clipped at the image border rather than padded, so edge
//! pixels are computed from fewer samples.

mod nonlinear;

pub use nonlinear::{FilterOp, nonlinear_filter};

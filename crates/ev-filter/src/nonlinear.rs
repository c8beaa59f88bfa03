use ev_core::BasicImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOp {
    Average,
    /// Harmonic mean; any zero in the window yields 0.
    Harmonic,
    Max,
    #[default]
    Median,
    /// `(min + max) / 2`.
    Midpoint,
    Min,
    /// `max - min`.
    Range,
}

/// Applies `op` over the `n x n` window centered at every pixel.
///
/// The window spans `-(n / 2)..=n / 2` around the center and is clipped to
/// the image, so border pixels use fewer samples. `n` is expected to be odd.
pub fn nonlinear_filter(src: &BasicImage, dst: &mut BasicImage, op: FilterOp, n: usize) {
    debug_assert!(src.same_dims(dst));
    let (w, h) = src.dims();
    if w == 0 || h == 0 {
        return;
    }

    let half = n / 2;
    let mut scratch = Vec::with_capacity((2 * half + 1) * (2 * half + 1));

    for y in 0..h {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half).min(w - 1);

            scratch.clear();
            for wy in y0..=y1 {
                scratch.extend_from_slice(&src.row(wy)[x0..=x1]);
            }

            dst.set_pixel(x, y, window_value(op, &mut scratch));
        }
    }
}

fn window_value(op: FilterOp, window: &mut [u8]) -> u8 {
    let count = window.len();
    match op {
        FilterOp::Average => {
            let sum: u32 = window.iter().map(|&v| u32::from(v)).sum();
            (sum as f32 / count as f32 + 0.5) as u8
        }
        FilterOp::Harmonic => {
            if window.contains(&0) {
                return 0;
            }
            let inv: f32 = window.iter().map(|&v| 1.0 / f32::from(v)).sum();
            (count as f32 / inv + 0.5) as u8
        }
        FilterOp::Max => max_of(window),
        FilterOp::Min => min_of(window),
        FilterOp::Median => {
            window.sort_unstable();
            window[count / 2]
        }
        FilterOp::Midpoint => ((u16::from(min_of(window)) + u16::from(max_of(window))) / 2) as u8,
        FilterOp::Range => max_of(window) - min_of(window),
    }
}

fn max_of(window: &[u8]) -> u8 {
    window.iter().copied().max().unwrap_or(0)
}

fn min_of(window: &[u8]) -> u8 {
    window.iter().copied().min().unwrap_or(0)
}

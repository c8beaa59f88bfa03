use ev_core::BasicImage;
use log::{debug, warn};

use crate::histogram::{Histogram, histogram};

const MAX_TWO_MEANS_ITERATIONS: usize = 256;

/// Which side of the threshold is kept as foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Brightness {
    /// Objects are darker than the background: keep `[0, T]`.
    #[default]
    Dark,
    /// Objects are brighter than the background: keep `[T, 255]`.
    Bright,
}

fn apply(src: &BasicImage, dst: &mut BasicImage, t: u8, brightness: Brightness) {
    match brightness {
        Brightness::Dark => ev_point::threshold(src, dst, 0, t),
        Brightness::Bright => ev_point::threshold(src, dst, t, 255),
    }
}

/// Iterative two-class threshold selection.
///
/// Starts halfway between the lowest and highest occupied bins and moves the
/// split to the mean of the two class means until it no longer changes.
pub fn two_means_level(hist: &Histogram) -> u8 {
    let Some(lo) = hist.iter().position(|&c| c != 0) else {
        return 0;
    };
    let hi = hist.iter().rposition(|&c| c != 0).unwrap_or(lo);

    let mut split = (lo + hi) / 2;
    for iteration in 0..MAX_TWO_MEANS_ITERATIONS {
        let (mut sum_l, mut n_l, mut sum_r, mut n_r) = (0u64, 0u64, 0u64, 0u64);
        for (v, &c) in hist.iter().enumerate() {
            if v <= split {
                sum_l += c as u64 * v as u64;
                n_l += c as u64;
            } else {
                sum_r += c as u64 * v as u64;
                n_r += c as u64;
            }
        }

        if n_l == 0 || n_r == 0 {
            debug!("two-means: one class empty at split {split}, stopping");
            return split as u8;
        }

        let next = ((sum_l / n_l + sum_r / n_r) / 2) as usize;
        if next == split {
            debug!("two-means converged to {split} after {} iterations", iteration + 1);
            return split as u8;
        }
        split = next;
    }

    warn!("two-means did not converge, using split {split}");
    split as u8
}

/// Otsu threshold: the level maximizing the between-class variance.
///
/// Object pixels are those `<= T`. Ties keep the lowest `T`. Saturated
/// pixels (bin 255) belong to neither class.
pub fn otsu_level(hist: &Histogram) -> u8 {
    let total: u64 = hist.iter().take(255).map(|&c| c as u64).sum();
    let total_sum: u64 = hist
        .iter()
        .enumerate()
        .take(255)
        .map(|(v, &c)| c as u64 * v as u64)
        .sum();

    let mut obj_n = 0u64;
    let mut obj_sum = 0u64;
    let mut best = 0.0f64;
    let mut level = 0usize;

    for (t, &c) in hist.iter().enumerate().take(255) {
        obj_n += c as u64;
        obj_sum += c as u64 * t as u64;
        let back_n = total - obj_n;
        if obj_n == 0 || back_n == 0 {
            continue;
        }

        let obj_mean = obj_sum as f64 / obj_n as f64;
        let back_mean = (total_sum - obj_sum) as f64 / back_n as f64;
        let bcv = back_n as f64 * obj_n as f64 * (back_mean - obj_mean).powi(2);
        if bcv > best {
            best = bcv;
            level = t;
        }
    }

    debug!("otsu level {level}");
    level as u8
}

/// Binarizes `src` at the two-means level and returns that level.
pub fn threshold_two_means(src: &BasicImage, dst: &mut BasicImage, brightness: Brightness) -> u8 {
    let t = two_means_level(&histogram(&src.as_view()));
    apply(src, dst, t, brightness);
    t
}

/// Binarizes `src` at the Otsu level and returns that level.
pub fn threshold_otsu(src: &BasicImage, dst: &mut BasicImage, brightness: Brightness) -> u8 {
    let t = otsu_level(&histogram(&src.as_view()));
    apply(src, dst, t, brightness);
    t
}

#[cfg(test)]
mod tests {
    use ev_core::{BasicImage, Content, Image};

    use super::{Brightness, otsu_level, threshold_otsu, threshold_two_means, two_means_level};

    fn bimodal() -> BasicImage {
        let mut data = vec![20u8; 100];
        data.extend(std::iter::repeat_n(200u8, 100));
        Image::from_vec(20, 10, data).expect("valid image")
    }

    #[test]
    fn otsu_separates_bimodal_peaks() {
        let src = bimodal();
        let mut dst = BasicImage::new(20, 10).expect("alloc");
        let t = threshold_otsu(&src, &mut dst, Brightness::Dark);

        assert!((20..200).contains(&t), "threshold {t}");
        assert_eq!(dst.content(), Content::Binary);
        for (&s, &d) in src.data().iter().zip(dst.data()) {
            assert_eq!(d == 1, s == 20);
        }

        let mut again = BasicImage::new(20, 10).expect("alloc");
        ev_point::threshold(&src, &mut again, 0, t);
        assert_eq!(again.data(), dst.data());
    }

    #[test]
    fn otsu_ties_keep_lowest_level() {
        let mut hist = [0u32; 256];
        hist[20] = 100;
        hist[200] = 100;
        assert_eq!(otsu_level(&hist), 20);
    }

    #[test]
    fn otsu_ignores_saturated_bin() {
        let mut hist = [0u32; 256];
        hist[0] = 100;
        hist[100] = 100;
        hist[255] = 100;
        assert_eq!(otsu_level(&hist), 0);

        // Only saturated pixels besides one level: a single class remains.
        let mut white = [0u32; 256];
        white[40] = 10;
        white[255] = 500;
        assert_eq!(otsu_level(&white), 0);
    }

    #[test]
    fn otsu_bright_keeps_upper_class() {
        let src = bimodal();
        let mut dst = BasicImage::new(20, 10).expect("alloc");
        let t = threshold_otsu(&src, &mut dst, Brightness::Bright);
        assert_eq!(t, 20);
        // [T, 255] includes the lower peak itself when T sits on it.
        assert!(dst.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn two_means_lands_between_peaks() {
        let src = bimodal();
        let mut dst = BasicImage::new(20, 10).expect("alloc");
        let t = threshold_two_means(&src, &mut dst, Brightness::Bright);
        assert_eq!(t, 110);
        for (&s, &d) in src.data().iter().zip(dst.data()) {
            assert_eq!(d == 1, s == 200);
        }
    }

    #[test]
    fn two_means_iterates_toward_class_means() {
        let mut hist = [0u32; 256];
        hist[0] = 10;
        hist[10] = 10;
        hist[100] = 1;
        // Seed 50; left mean 5, right mean 100 -> 52; stable.
        assert_eq!(two_means_level(&hist), 52);
    }

    #[test]
    fn degenerate_histograms() {
        assert_eq!(two_means_level(&[0u32; 256]), 0);
        let mut flat = [0u32; 256];
        flat[77] = 9;
        assert_eq!(two_means_level(&flat), 77);
        assert_eq!(otsu_level(&flat), 0);
    }
}

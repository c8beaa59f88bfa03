use ev_core::BasicImage;

use crate::analyse::{BlobInfo, analyse_blob};

/// Outermost pixels of a blob along the two diagonals, as `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: (usize, usize),
    pub top_right: (usize, usize),
    pub bottom_left: (usize, usize),
    pub bottom_right: (usize, usize),
}

/// Blob with the most pixels among labels `1..=count`.
///
/// On equal areas the lower label wins.
pub fn largest_blob(img: &BasicImage, count: u8) -> Option<(u8, BlobInfo)> {
    let mut best: Option<(u8, BlobInfo)> = None;
    for label in 1..=count {
        let Ok(info) = analyse_blob(img, label) else {
            continue;
        };
        if best.is_none_or(|(_, b)| info.pixel_count > b.pixel_count) {
            best = Some((label, info));
        }
    }
    best
}

/// Corner candidates of blob `label` for a quadrilateral fit.
///
/// Top-left minimizes `x + y`, bottom-right maximizes it; top-right
/// maximizes `x - y`, bottom-left minimizes it. Ties keep the first pixel in
/// raster order.
pub fn extreme_corners(img: &BasicImage, label: u8) -> Option<Corners> {
    let mut corners: Option<Corners> = None;
    let mut sums = (0usize, 0usize);
    let mut diffs = (0isize, 0isize);

    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if v != label {
                continue;
            }

            let sum = x + y;
            let diff = x as isize - y as isize;
            if corners.is_none() {
                corners = Some(Corners {
                    top_left: (x, y),
                    top_right: (x, y),
                    bottom_left: (x, y),
                    bottom_right: (x, y),
                });
                sums = (sum, sum);
                diffs = (diff, diff);
                continue;
            }
            let Some(c) = corners.as_mut() else {
                continue;
            };

            if sum < sums.0 {
                sums.0 = sum;
                c.top_left = (x, y);
            }
            if sum > sums.1 {
                sums.1 = sum;
                c.bottom_right = (x, y);
            }
            if diff < diffs.0 {
                diffs.0 = diff;
                c.bottom_left = (x, y);
            }
            if diff > diffs.1 {
                diffs.1 = diff;
                c.top_right = (x, y);
            }
        }
    }

    corners
}

#[cfg(test)]
mod tests {
    use ev_core::Image;

    use super::{Corners, extreme_corners, largest_blob};

    #[test]
    fn largest_blob_prefers_lower_label_on_ties() {
        #[rustfmt::skip]
        let img = Image::from_vec(6, 2, vec![
            1u8, 1, 0, 2, 2, 0,
            0,   0, 0, 0, 0, 3,
        ]).expect("valid image");

        let (label, info) = largest_blob(&img, 3).expect("blobs present");
        assert_eq!(label, 1);
        assert_eq!(info.pixel_count, 2);
        assert!(largest_blob(&img, 0).is_none());
    }

    #[test]
    fn corners_of_tilted_quad() {
        // A diamond: the diagonal extremes are its edges' endpoints.
        #[rustfmt::skip]
        let img = Image::from_vec(5, 5, vec![
            0u8, 0, 1, 0, 0,
            0,   1, 1, 1, 0,
            1,   1, 1, 1, 1,
            0,   1, 1, 1, 0,
            0,   0, 1, 0, 0,
        ]).expect("valid image");

        let c = extreme_corners(&img, 1).expect("blob present");
        assert_eq!(
            c,
            Corners {
                top_left: (2, 0),
                top_right: (2, 0),
                bottom_left: (0, 2),
                bottom_right: (4, 2),
            }
        );
        assert!(extreme_corners(&img, 2).is_none());
    }

    #[test]
    fn corners_of_axis_aligned_rectangle() {
        let mut img = Image::new_fill(10, 10, 0u8);
        for y in 2..6 {
            for x in 1..8 {
                img.set_pixel(x, y, 5);
            }
        }
        let c = extreme_corners(&img, 5).expect("blob present");
        assert_eq!(c.top_left, (1, 2));
        assert_eq!(c.top_right, (7, 2));
        assert_eq!(c.bottom_left, (1, 5));
        assert_eq!(c.bottom_right, (7, 5));
    }
}

use std::f32::consts::SQRT_2;

use ev_core::{BasicImage, Connectivity, Error, neighbor_count};

const SQRT_5: f32 = 2.236_068;

/// Measurements of one labeled blob.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlobInfo {
    /// Bounding-box origin.
    pub min_x: usize,
    pub min_y: usize,
    pub width: usize,
    pub height: usize,
    pub pixel_count: usize,
    /// Boundary length estimate, see [`analyse_blob`].
    pub perimeter: f32,
}

impl BlobInfo {
    /// `perimeter² / area`; grows as a shape departs from a disc.
    pub fn form_factor(&self) -> f32 {
        self.perimeter * self.perimeter / self.pixel_count as f32
    }
}

/// Bounding box, area and perimeter of blob `label` in one raster pass.
///
/// Each blob pixel with exactly 1, 2 or 3 background (value 0) 4-neighbors
/// adds 1, √2 or √5 to the perimeter. Neighbors outside the image do not
/// count as background.
pub fn analyse_blob(img: &BasicImage, label: u8) -> Result<BlobInfo, Error> {
    let (w, h) = img.dims();
    let mut info = BlobInfo::default();
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (w, h, 0, 0);

    for y in 0..h {
        for (x, &v) in img.row(y).iter().enumerate() {
            if v != label {
                continue;
            }

            info.pixel_count += 1;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            info.perimeter += match neighbor_count(img, x, y, 0, Connectivity::C4) {
                1 => 1.0,
                2 => SQRT_2,
                3 => SQRT_5,
                _ => 0.0,
            };
        }
    }

    if info.pixel_count == 0 {
        return Err(Error::EmptyBlob { label });
    }

    info.min_x = min_x;
    info.min_y = min_y;
    info.width = max_x - min_x + 1;
    info.height = max_y - min_y + 1;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ev_core::{Error, Image};

    use super::{SQRT_5, analyse_blob};

    #[test]
    fn rectangle_extents_and_area() {
        let mut img = Image::new_fill(10, 8, 0u8);
        for y in 2..5 {
            for x in 3..9 {
                img.set_pixel(x, y, 4);
            }
        }

        let info = analyse_blob(&img, 4).expect("blob present");
        assert_eq!((info.min_x, info.min_y), (3, 2));
        assert_eq!((info.width, info.height), (6, 3));
        assert_eq!(info.pixel_count, 18);
        // 4 corners with two background neighbors, 10 edge pixels with one.
        assert_relative_eq!(
            info.perimeter,
            4.0 * std::f32::consts::SQRT_2 + 10.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn isolated_pixel_counts_sqrt5_only_with_three_background_neighbors() {
        let mut img = Image::new_fill(5, 5, 0u8);
        img.set_pixel(2, 2, 1);
        // Four background neighbors: no contribution.
        assert_relative_eq!(analyse_blob(&img, 1).expect("blob").perimeter, 0.0);

        img.set_pixel(3, 2, 1);
        let info = analyse_blob(&img, 1).expect("blob");
        assert_relative_eq!(info.perimeter, 2.0 * SQRT_5, epsilon = 1e-5);
        assert_eq!((info.width, info.height), (2, 1));
    }

    #[test]
    fn image_border_is_not_background() {
        let img = Image::new_fill(3, 3, 1u8);
        let info = analyse_blob(&img, 1).expect("blob");
        assert_eq!(info.pixel_count, 9);
        assert_relative_eq!(info.perimeter, 0.0);
    }

    #[test]
    fn missing_label_is_an_error() {
        let img = Image::new_fill(3, 3, 1u8);
        assert_eq!(analyse_blob(&img, 2), Err(Error::EmptyBlob { label: 2 }));
    }

    #[test]
    fn form_factor_of_square() {
        let mut img = Image::new_fill(12, 12, 0u8);
        for y in 1..11 {
            for x in 1..11 {
                img.set_pixel(x, y, 1);
            }
        }
        let info = analyse_blob(&img, 1).expect("blob");
        let expected = (32.0 + 4.0 * std::f32::consts::SQRT_2).powi(2) / 100.0;
        assert_relative_eq!(info.form_factor(), expected, epsilon = 1e-3);
    }
}

use ev_core::ImageView;

pub type Histogram = [u32; 256];

/// Counts each intensity under `img`.
pub fn histogram(img: &ImageView<'_, u8>) -> Histogram {
    let mut hist = [0u32; 256];
    for y in 0..img.height() {
        for &v in img.row(y) {
            hist[usize::from(v)] += 1;
        }
    }
    hist
}

#[cfg(test)]
mod tests {
    use ev_core::Image;

    use super::histogram;

    #[test]
    fn counts_every_pixel_once() {
        let img = Image::from_vec(3, 2, vec![0u8, 5, 5, 255, 5, 0]).expect("valid image");
        let hist = histogram(&img.as_view());
        assert_eq!(hist[0], 2);
        assert_eq!(hist[5], 3);
        assert_eq!(hist[255], 1);
        assert_eq!(hist.iter().sum::<u32>(), 6);
    }

    #[test]
    fn subview_histogram() {
        let img = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        let view = img.as_view().subview(1, 0, 2, 2).expect("valid subview");
        let hist = histogram(&view);
        assert_eq!(hist[1], 0);
        assert_eq!(hist[4], 0);
        assert_eq!(hist[2] + hist[3] + hist[5] + hist[6], 4);
    }
}

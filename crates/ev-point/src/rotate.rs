use ev_core::BasicImage;

/// How [`rotate180`] walks the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotate180 {
    /// Reverses the buffer one pixel at a time.
    #[default]
    ByteReverse,
    /// Swaps 32-bit words from both ends, byte-reversing each word.
    /// Buffers whose length is not a multiple of four use `ByteReverse`.
    WordReverse,
}

/// Rotates `img` by 180 degrees in place.
pub fn rotate180(img: &mut BasicImage, strategy: Rotate180) {
    let data = img.data_mut();
    match strategy {
        Rotate180::ByteReverse => data.reverse(),
        Rotate180::WordReverse => {
            if data.len().is_multiple_of(4) {
                reverse_words(data);
            } else {
                data.reverse();
            }
        }
    }
}

fn reverse_words(data: &mut [u8]) {
    let words = data.len() / 4;
    for i in 0..words / 2 {
        let j = words - 1 - i;
        let first = read_word(data, i).swap_bytes();
        let last = read_word(data, j).swap_bytes();
        write_word(data, i, last);
        write_word(data, j, first);
    }

    if words % 2 == 1 {
        let mid = words / 2;
        let w = read_word(data, mid).swap_bytes();
        write_word(data, mid, w);
    }
}

#[inline]
fn read_word(data: &[u8], i: usize) -> u32 {
    let b = &data[i * 4..i * 4 + 4];
    u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
}

#[inline]
fn write_word(data: &mut [u8], i: usize, w: u32) {
    data[i * 4..i * 4 + 4].copy_from_slice(&w.to_ne_bytes());
}

#[cfg(test)]
mod tests {
    use ev_core::{BasicImage, Image};

    use super::{Rotate180, rotate180};

    fn pattern(width: usize, height: usize) -> BasicImage {
        let data = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        Image::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn byte_reverse_moves_corners() {
        let mut img = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        rotate180(&mut img, Rotate180::ByteReverse);
        assert_eq!(img.data(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn word_reverse_matches_byte_reverse() {
        for (w, h) in [(4, 1), (4, 3), (8, 8), (12, 5), (3, 3), (5, 7), (1, 1)] {
            let mut reference = pattern(w, h);
            let mut fast = reference.clone();
            rotate180(&mut reference, Rotate180::ByteReverse);
            rotate180(&mut fast, Rotate180::WordReverse);
            assert_eq!(reference, fast, "{w}x{h}");
        }
    }

    #[test]
    fn twice_is_identity() {
        let original = pattern(16, 9);
        let mut img = original.clone();
        rotate180(&mut img, Rotate180::WordReverse);
        rotate180(&mut img, Rotate180::WordReverse);
        assert_eq!(img, original);
    }
}

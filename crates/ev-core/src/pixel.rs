/// Luminance weights applied to R, G and B when reducing color to intensity.
pub const LUMA_WEIGHTS: [f32; 3] = [0.212671, 0.715160, 0.072169];

/// Storage encoding of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    Basic,
    Int16,
    Float,
    Rgb888,
    Rgb565,
}

impl PixelType {
    pub fn size_bytes(self) -> usize {
        match self {
            Self::Basic => 1,
            Self::Int16 | Self::Rgb565 => 2,
            Self::Rgb888 => 3,
            Self::Float => 4,
        }
    }
}

/// Semantic interpretation of the pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Content {
    /// Plain intensities, clipped to the pixel range.
    #[default]
    Intensity,
    /// Every pixel is 0 or 1.
    Binary,
    /// 0 is background, 1..=N are blob labels.
    Labeled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Packed 5-6-5 color, red in the high bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub fn channels(self) -> (u8, u8, u8) {
        let v = self.0;
        ((v >> 11) as u8, ((v >> 5) & 0x3f) as u8, (v & 0x1f) as u8)
    }
}

/// A pixel encoding that can be reduced to an 8-bit intensity.
pub trait Pixel: Copy {
    const TYPE: PixelType;

    fn to_basic(self) -> u8;
}

impl Pixel for u8 {
    const TYPE: PixelType = PixelType::Basic;

    #[inline]
    fn to_basic(self) -> u8 {
        self
    }
}

impl Pixel for i16 {
    const TYPE: PixelType = PixelType::Int16;

    /// Keeps the low byte, like a C narrowing cast.
    #[inline]
    fn to_basic(self) -> u8 {
        self as u8
    }
}

impl Pixel for f32 {
    const TYPE: PixelType = PixelType::Float;

    /// Truncates toward zero; values outside 0..=255 saturate, NaN maps to 0.
    #[inline]
    fn to_basic(self) -> u8 {
        self as u8
    }
}

impl Pixel for Rgb888 {
    const TYPE: PixelType = PixelType::Rgb888;

    #[inline]
    fn to_basic(self) -> u8 {
        luma(self.r, self.g, self.b)
    }
}

impl Pixel for Rgb565 {
    const TYPE: PixelType = PixelType::Rgb565;

    /// Channels are weighted at their native 5/6/5-bit scale.
    #[inline]
    fn to_basic(self) -> u8 {
        let (r, g, b) = self.channels();
        luma(r, g, b)
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    (wr * r as f32 + wg * g as f32 + wb * b as f32) as u8
}

#[cfg(test)]
mod tests {
    use super::{Pixel, PixelType, Rgb565, Rgb888};

    #[test]
    fn rgb888_black_and_primaries() {
        assert_eq!(Rgb888 { r: 0, g: 0, b: 0 }.to_basic(), 0);
        assert_eq!(Rgb888 { r: 255, g: 0, b: 0 }.to_basic(), 54);
        assert_eq!(Rgb888 { r: 0, g: 255, b: 0 }.to_basic(), 182);
        assert_eq!(Rgb888 { r: 0, g: 0, b: 255 }.to_basic(), 18);
    }

    #[test]
    fn rgb565_unpacks_channels_unscaled() {
        let px = Rgb565(0xffff);
        assert_eq!(px.channels(), (31, 63, 31));
        // 0.212671 * 31 + 0.715160 * 63 + 0.072169 * 31 = 53.88
        assert_eq!(px.to_basic(), 53);
    }

    #[test]
    fn scalar_casts() {
        assert_eq!(300i16.to_basic(), 44);
        assert_eq!((-1i16).to_basic(), 255);
        assert_eq!(12.9f32.to_basic(), 12);
        assert_eq!(999.0f32.to_basic(), 255);
        assert_eq!(PixelType::Rgb888.size_bytes(), 3);
    }
}

use crate::Error;
use crate::image::{BasicImage, Image};
use crate::pixel::Pixel;

/// Reduces any supported pixel encoding into an existing basic image.
///
/// `dst` must have the dimensions of `src`. Its content tag is taken from
/// `src`.
pub fn convert_to_basic<P: Pixel>(src: &Image<P>, dst: &mut BasicImage) -> Result<(), Error> {
    if !src.same_dims(dst) {
        return Err(Error::DimensionMismatch {
            expected: src.dims(),
            actual: dst.dims(),
        });
    }

    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = s.to_basic();
    }
    dst.set_content(src.content());
    Ok(())
}

/// Allocates a basic image and fills it from `src`.
pub fn to_basic<P: Pixel>(src: &Image<P>) -> Result<BasicImage, Error> {
    let mut dst = BasicImage::new(src.width(), src.height())?;
    convert_to_basic(src, &mut dst)?;
    Ok(dst)
}

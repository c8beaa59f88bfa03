use ev_core::{BasicImage, Content};

/// Binary complement: `1` becomes `0`, every other value becomes `1`.
pub fn invert(src: &BasicImage, dst: &mut BasicImage) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = u8::from(s != 1);
    }
    dst.set_content(Content::Binary);
}

pub fn invert_in_place(img: &mut BasicImage) {
    for v in img.data_mut() {
        *v = u8::from(*v != 1);
    }
    img.set_content(Content::Binary);
}

/// Replaces every `selected` pixel by `value`; other pixels pass through.
pub fn select_to_value(src: &BasicImage, dst: &mut BasicImage, selected: u8, value: u8) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = if s == selected { value } else { s };
    }
}

pub fn select_to_value_in_place(img: &mut BasicImage, selected: u8, value: u8) {
    for v in img.data_mut() {
        if *v == selected {
            *v = value;
        }
    }
}

/// Binarizes `src`: 1 where `low <= p <= high`, else 0.
pub fn threshold(src: &BasicImage, dst: &mut BasicImage, low: u8, high: u8) {
    debug_assert!(src.same_dims(dst));
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = u8::from((low..=high).contains(&s));
    }
    dst.set_content(Content::Binary);
}

pub fn threshold_in_place(img: &mut BasicImage, low: u8, high: u8) {
    for v in img.data_mut() {
        *v = u8::from((low..=high).contains(v));
    }
    img.set_content(Content::Binary);
}

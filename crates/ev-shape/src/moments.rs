use ev_core::{BasicImage, Error};

struct RawMoments {
    m00: u64,
    m10: u64,
    m01: u64,
}

fn raw_moments(img: &BasicImage, label: u8) -> Result<RawMoments, Error> {
    let mut m = RawMoments {
        m00: 0,
        m10: 0,
        m01: 0,
    };
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if v == label {
                m.m00 += 1;
                m.m10 += x as u64;
                m.m01 += y as u64;
            }
        }
    }

    if m.m00 == 0 {
        return Err(Error::EmptyBlob { label });
    }
    Ok(m)
}

/// Center of mass of blob `label` as `(x, y)`, truncated to whole pixels.
pub fn centroid(img: &BasicImage, label: u8) -> Result<(usize, usize), Error> {
    let m = raw_moments(img, label)?;
    Ok(((m.m10 / m.m00) as usize, (m.m01 / m.m00) as usize))
}

/// Scale-invariant central moment `eta_pq` of blob `label`.
///
/// `eta_00 = 1` and `eta_10 = eta_01 = 0` by definition and are returned
/// without scanning the image.
pub fn normalized_central_moment(
    img: &BasicImage,
    label: u8,
    p: u32,
    q: u32,
) -> Result<f64, Error> {
    match (p, q) {
        (0, 0) => return Ok(1.0),
        (1, 0) | (0, 1) => return Ok(0.0),
        _ => {}
    }

    let m = raw_moments(img, label)?;
    let xc = m.m10 as f64 / m.m00 as f64;
    let yc = m.m01 as f64 / m.m00 as f64;

    let mut upq = 0.0f64;
    for y in 0..img.height() {
        let dy = (y as f64 - yc).powi(q as i32);
        for (x, &v) in img.row(y).iter().enumerate() {
            if v == label {
                upq += (x as f64 - xc).powi(p as i32) * dy;
            }
        }
    }

    let gamma = f64::from(p + q) / 2.0 + 1.0;
    Ok(upq / (m.m00 as f64).powf(gamma))
}

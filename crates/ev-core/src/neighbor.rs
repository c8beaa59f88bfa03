use crate::image::Image;

const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];
const DIRS_C4: [usize; 4] = [0, 2, 4, 6];
const DIRS_C8: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Axis-aligned neighbors only.
    C4,
    /// Axis-aligned and diagonal neighbors.
    #[default]
    C8,
}

impl Connectivity {
    pub fn opposite(self) -> Self {
        match self {
            Self::C4 => Self::C8,
            Self::C8 => Self::C4,
        }
    }

    fn dirs(self) -> &'static [usize] {
        match self {
            Self::C4 => &DIRS_C4,
            Self::C8 => &DIRS_C8,
        }
    }
}

/// In-bounds neighbor positions of `(x, y)` under `conn`.
#[inline]
pub fn neighbors<T>(
    img: &Image<T>,
    x: usize,
    y: usize,
    conn: Connectivity,
) -> impl Iterator<Item = (usize, usize)> {
    let (w, h) = img.dims();
    conn.dirs().iter().filter_map(move |&d| {
        let nx = x.checked_add_signed(DX[d])?;
        let ny = y.checked_add_signed(DY[d])?;
        (nx < w && ny < h).then_some((nx, ny))
    })
}

/// Number of neighbors of `(x, y)` whose value equals `value`.
///
/// Positions outside the image are skipped, so a corner pixel has at most
/// three 8-connected neighbors.
pub fn neighbor_count<T: Copy + PartialEq>(
    img: &Image<T>,
    x: usize,
    y: usize,
    value: T,
    conn: Connectivity,
) -> u32 {
    neighbors(img, x, y, conn)
        .filter(|&(nx, ny)| img.pixel(nx, ny) == value)
        .count() as u32
}

/// Smallest neighbor value that is greater than zero, if any.
pub fn lowest_nonzero_neighbor<T: Copy + Ord + Default>(
    img: &Image<T>,
    x: usize,
    y: usize,
    conn: Connectivity,
) -> Option<T> {
    let zero = T::default();
    neighbors(img, x, y, conn)
        .map(|(nx, ny)| img.pixel(nx, ny))
        .filter(|&v| v > zero)
        .min()
}

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    OutOfBounds,
    InvalidStride,
    AllocationFailed {
        bytes: usize,
    },
    /// More connected components than an 8-bit label image can hold.
    LabelOverflow {
        count: usize,
    },
    EmptyBlob {
        label: u8,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::AllocationFailed { bytes } => {
                write!(f, "unable to allocate {bytes} bytes for pixel data")
            }
            Self::LabelOverflow { count } => {
                write!(f, "{count} blobs found, at most 255 fit in a label image")
            }
            Self::EmptyBlob { label } => write!(f, "blob {label} has no pixels"),
        }
    }
}

impl std::error::Error for Error {}

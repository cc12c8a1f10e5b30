use std::fmt;

#[derive(Debug)]
pub enum SimError {
    /// Grid resolution the spectral solver cannot handle.
    InvalidResolution(usize),
    InvalidTimestep(f32),
    InvalidParameter { name: &'static str, value: f32 },
    /// Buffer allocation for `cells` elements failed.
    Allocation { cells: usize },
    Transform(realfft::FftError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidResolution(n) => {
                write!(f, "unsupported grid resolution {n} (must be even and at least 8)")
            }
            SimError::InvalidTimestep(dt) => {
                write!(f, "timestep must be finite and positive, got {dt}")
            }
            SimError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter `{name}`")
            }
            SimError::Allocation { cells } => {
                write!(f, "failed to allocate buffer of {cells} cells")
            }
            SimError::Transform(err) => write!(f, "fourier transform failed: {err}"),
            SimError::Io(err) => write!(f, "io error: {err}"),
            SimError::Json(err) => write!(f, "config parse error: {err}"),
            SimError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Transform(err) => Some(err),
            SimError::Io(err) => Some(err),
            SimError::Json(err) => Some(err),
            SimError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<realfft::FftError> for SimError {
    fn from(err: realfft::FftError) -> Self {
        SimError::Transform(err)
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Json(err)
    }
}

impl From<image::ImageError> for SimError {
    fn from(err: image::ImageError) -> Self {
        SimError::Image(err)
    }
}

/// Allocates a buffer of `len` copies of `fill`, reporting failure instead of
/// aborting.
pub fn alloc_buffer<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, SimError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SimError::Allocation { cells: len })?;
    buffer.resize(len, fill);
    Ok(buffer)
}

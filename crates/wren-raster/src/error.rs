use std::path::PathBuf;

use thiserror::Error;

/// Failures creating or saving a raster canvas.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The pixel buffer could not be allocated.
    #[error("failed to allocate a {width}x{height} pixel buffer")]
    Allocation {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The image could not be encoded or written.
    #[error("failed to save screenshot to '{}': {source}", path.display())]
    Encode {
        /// Destination file.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}

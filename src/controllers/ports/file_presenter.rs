use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished frame to disk.
pub trait FilePresenterPort {
    type Error: std::error::Error;

    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), Self::Error>;
}

use thiserror::Error;

use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

const BYTES_PER_PIXEL: usize = 3;

fn resolution_to_buffer_size(resolution: Resolution) -> usize {
    resolution.pixel_count() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelBufferError {
    #[error(
        "pixel at x:{}, y:{} outside of {}x{} image",
        .pixel.x, .pixel.y, .resolution.width(), .resolution.height()
    )]
    PixelOutsideBounds { pixel: Point, resolution: Resolution },
    #[error("resolution needs {expected} bytes but buffer has {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type PixelBufferData = Vec<u8>;

/// Packed row-major RGB8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    resolution: Resolution,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            buffer: vec![0; resolution_to_buffer_size(resolution)],
        }
    }

    pub fn from_data(
        resolution: Resolution,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected = resolution_to_buffer_size(resolution);

        if expected != buffer.len() {
            return Err(PixelBufferError::SizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self { resolution, buffer })
    }

    /// Packs row-major colours; `colours` must hold exactly one entry per pixel.
    pub fn from_colours(
        resolution: Resolution,
        colours: &[Colour],
    ) -> Result<Self, PixelBufferError> {
        if colours.len() != resolution.pixel_count() {
            return Err(PixelBufferError::SizeMismatch {
                expected: resolution_to_buffer_size(resolution),
                actual: colours.len() * BYTES_PER_PIXEL,
            });
        }

        let buffer = colours.iter().flat_map(|c| [c.r, c.g, c.b]).collect();

        Ok(Self { resolution, buffer })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour::rgb(
            self.buffer[index],
            self.buffer[index + 1],
            self.buffer[index + 2],
        ))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Colour::rgb(px[0], px[1], px[2]))
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.resolution.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                resolution: self.resolution,
            });
        }

        let row = pixel.y as usize * self.resolution.width() as usize;
        Ok((row + pixel.x as usize) * BYTES_PER_PIXEL)
    }
}

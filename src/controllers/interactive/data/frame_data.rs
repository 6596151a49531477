use std::time::Duration;

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub params: FractalParameters,
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
}

use crate::core::actions::render_fractal::RenderError;
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;

/// Produces one complete frame for a snapshot.
pub trait FrameRenderer: Send + Sync {
    fn render(
        &self,
        params: &FractalParameters,
        resolution: Resolution,
    ) -> Result<PixelBuffer, RenderError>;
}

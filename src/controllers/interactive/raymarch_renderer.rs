use crate::controllers::interactive::ports::frame_renderer::FrameRenderer;
use crate::core::actions::render_fractal::{RenderError, render_fractal};
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_settings::RenderSettings;
use crate::core::data::resolution::Resolution;

#[derive(Debug, Clone, Copy, Default)]
pub struct RaymarchRenderer {
    settings: RenderSettings,
}

impl RaymarchRenderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}

impl FrameRenderer for RaymarchRenderer {
    fn render(
        &self,
        params: &FractalParameters,
        resolution: Resolution,
    ) -> Result<PixelBuffer, RenderError> {
        render_fractal(params, &self.settings, resolution)
    }
}

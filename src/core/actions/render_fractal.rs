use thiserror::Error;
use tracing::debug;

use crate::core::actions::render_frame::render_frame_parallel_rayon::render_frame_parallel_rayon;
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::render_settings::{RenderSettings, SettingsError};
use crate::core::data::resolution::{Resolution, ResolutionError};
use crate::core::raymarch::algorithm::RaymarchAlgorithm;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("render settings rejected: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    PixelBuffer(#[from] PixelBufferError),
}

/// Renders one complete frame of `params` on the rayon pool.
pub fn render_fractal(
    params: &FractalParameters,
    settings: &RenderSettings,
    resolution: Resolution,
) -> Result<PixelBuffer, RenderError> {
    settings.validate()?;

    debug!(
        width = resolution.width(),
        height = resolution.height(),
        kind = params.kind().display_name(),
        power = params.power(),
        "rendering frame"
    );

    let algorithm = RaymarchAlgorithm::new(params, settings, resolution);
    let colours = render_frame_parallel_rayon(resolution, &algorithm);

    Ok(PixelBuffer::from_colours(resolution, &colours)?)
}

/// [`render_fractal`] for a raw `width × height`.
pub fn render_fractal_at(
    params: &FractalParameters,
    settings: &RenderSettings,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, RenderError> {
    render_fractal(params, settings, Resolution::new(width, height)?)
}

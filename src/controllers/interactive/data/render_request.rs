use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::resolution::Resolution;

/// One parameter snapshot queued for rendering. Higher generations supersede lower ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub params: FractalParameters,
    pub resolution: Resolution,
    pub generation: u64,
}

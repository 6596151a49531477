use thiserror::Error;

use crate::core::actions::render_fractal::RenderError;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("frame {generation} failed: {source}")]
pub struct FrameError {
    pub generation: u64,
    #[source]
    pub source: RenderError,
}

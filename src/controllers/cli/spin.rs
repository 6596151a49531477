use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::surface::RenderSurface;
use crate::core::data::fractal_params::ParamsError;
use crate::presenters::file::image_file::ExportError;

#[derive(Debug, Error)]
pub enum SpinError {
    #[error("spin needs at least one frame")]
    NoFrames,
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinOptions {
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    /// Image extension for every frame, e.g. `png`.
    pub extension: String,
}

/// Angle offsets of `frames` evenly spaced steps over one full turn.
pub fn spin_offsets(frames: u32) -> impl Iterator<Item = f64> {
    (0..frames).map(move |i| 360.0 * f64::from(i) / f64::from(frames))
}

#[must_use]
pub fn frame_path(out_dir: &Path, index: u32, extension: &str) -> PathBuf {
    out_dir.join(format!("frame_{index:04}.{extension}"))
}

/// Exports one full rotation as numbered frames. The surface's parameters are restored afterwards.
pub fn export_spin<P>(
    surface: &mut RenderSurface<P>,
    out_dir: &Path,
    options: &SpinOptions,
) -> Result<Vec<PathBuf>, SpinError>
where
    P: FilePresenterPort<Error = ExportError>,
{
    if options.frames == 0 {
        return Err(SpinError::NoFrames);
    }

    let base = *surface.parameters();
    let start_angle = base.rotation().angle_degrees;
    let mut written = Vec::with_capacity(options.frames as usize);

    for (index, offset) in (0..).zip(spin_offsets(options.frames)) {
        let frame = base.updated(|r| r.rotation.angle_degrees = start_angle + offset)?;
        surface.set_parameters(frame);

        let path = frame_path(out_dir, index, &options.extension);
        let exported = surface.export_image(&path, options.width, options.height);
        if let Err(error) = exported {
            surface.set_parameters(base);
            return Err(error.into());
        }

        info!(frame = index, angle = frame.rotation().angle_degrees, "spin frame written");
        written.push(path);
    }

    surface.set_parameters(base);

    Ok(written)
}

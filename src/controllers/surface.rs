//! Headless rendering surface: the state a display widget would own.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::controllers::interactive::animation::RotationClock;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_fractal::{RenderError, render_fractal_at};
use crate::core::animation::AnimationLimits;
use crate::core::data::fractal_params::{FractalParameters, FractalRecord, ParamsError};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_settings::RenderSettings;
use crate::presenters::file::image_file::{ExportError, ImageFilePresenter, format_for_path};
use crate::storage::fractal_document::{DocumentError, load_document, save_document};

pub struct RenderSurface<P = ImageFilePresenter>
where
    P: FilePresenterPort<Error = ExportError>,
{
    params: FractalParameters,
    settings: RenderSettings,
    clock: RotationClock,
    presenter: P,
}

impl RenderSurface<ImageFilePresenter> {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self::with_presenter(settings, AnimationLimits::default(), ImageFilePresenter::new())
    }
}

impl<P> RenderSurface<P>
where
    P: FilePresenterPort<Error = ExportError>,
{
    #[must_use]
    pub fn with_presenter(settings: RenderSettings, limits: AnimationLimits, presenter: P) -> Self {
        Self {
            params: FractalParameters::default(),
            settings,
            clock: RotationClock::new(limits),
            presenter,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &FractalParameters {
        &self.params
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_parameters(&mut self, params: FractalParameters) {
        self.params = params;
    }

    /// Validated edit; on error the current parameters stay in place.
    pub fn edit(&mut self, edit: impl FnOnce(&mut FractalRecord)) -> Result<(), ParamsError> {
        self.params = self.params.updated(edit)?;
        Ok(())
    }

    pub fn render(&self, width: u32, height: u32) -> Result<PixelBuffer, RenderError> {
        render_fractal_at(&self.params, &self.settings, width, height)
    }

    /// Advances rotation by `elapsed`. Returns true when a redraw is due.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let result = self.clock.advance(elapsed, &self.params);
        self.params = result.params;

        result.angle_changed
    }

    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.params.rotation().angle_degrees
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.params = load_document(path)?;
        self.clock.reset();

        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        save_document(&self.params, path)
    }

    /// Renders at `width × height` and encodes by the extension of `path`.
    pub fn export_image(
        &self,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        format_for_path(path)?;

        let buffer = self.render(width, height)?;
        debug!(path = %path.display(), width, height, "exporting frame");

        self.presenter.present(&buffer, path)
    }
}

mod controllers;
mod core;
mod presenters;
mod storage;

pub use crate::controllers::cli::spin::{
    SpinError, SpinOptions, export_spin, frame_path, spin_offsets,
};
pub use crate::controllers::interactive::animation::{
    Completion, FrameScheduler, RotationClock, SchedulerAction, SchedulerState, TickResult,
};
pub use crate::controllers::interactive::data::frame_data::FrameData;
pub use crate::controllers::interactive::data::render_request::RenderRequest;
pub use crate::controllers::interactive::errors::frame_error::FrameError;
pub use crate::controllers::interactive::{
    FrameRenderer, InteractiveController, PresenterPort, RaymarchRenderer, RenderEvent,
};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::surface::RenderSurface;
pub use crate::core::actions::render_fractal::{RenderError, render_fractal, render_fractal_at};
pub use crate::core::actions::render_frame::ports::pixel_algorithm::PixelAlgorithm;
pub use crate::core::actions::render_frame::render_frame_parallel_rayon::render_frame_parallel_rayon;
pub use crate::core::actions::render_frame::render_frame_serial::render_frame_serial;
pub use crate::core::animation::AnimationLimits;
pub use crate::core::data::camera::Camera;
pub use crate::core::data::colour::{Colour, ColourParseError};
pub use crate::core::data::fractal_params::{
    ColourSlot, FractalParameters, FractalRecord, MAX_PITCH_DEGREES, MAX_POWER, MIN_POWER,
    ParamsError, Rotation,
};
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::render_settings::{RenderSettings, SettingsError};
pub use crate::core::data::resolution::{Resolution, ResolutionError};
pub use crate::core::fractals::distance_estimator::{DeSample, estimate};
pub use crate::core::fractals::fractal_kinds::{FractalKind, UnknownFractalKind};
pub use crate::core::raymarch::algorithm::RaymarchAlgorithm;
pub use crate::core::raymarch::camera_rays::{Ray, ViewTransform};
pub use crate::core::raymarch::marcher::{HitResult, march};
pub use crate::core::raymarch::shader::{shade, surface_normal};
pub use crate::presenters::file::image_file::{ExportError, ImageFilePresenter, format_for_path};
pub use crate::storage::fractal_document::{
    DOCUMENT_EXTENSION, DocumentError, from_json, load_document, save_document, to_json,
};

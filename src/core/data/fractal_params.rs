//! The validated parameter snapshot the renderer consumes.
//!
//! [`FractalParameters`] can only be built from a [`FractalRecord`] that passes
//! validation, so the renderer never sees a zero zoom, a power below two or a
//! non-finite coordinate. Edits produce new snapshots; nothing is mutated in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::data::camera::Camera;
use crate::core::data::colour::Colour;
use crate::core::fractals::fractal_kinds::{FractalKind, UnknownFractalKind};

pub const MIN_POWER: u32 = 2;
pub const MAX_POWER: u32 = 32;
pub const MAX_PITCH_DEGREES: f64 = 89.0;
pub const DEFAULT_POWER: u32 = 8;
pub const DEFAULT_ROTATION_SPEED: f64 = 30.0;
pub const ZOOM_STEP: f64 = 1.5;
pub const MAX_STEPPED_ZOOM: f64 = 8.0;

const RANDOM_COEFFICIENT_RANGE: f64 = 0.5;
const RANDOM_MAX_POWER: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamsError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("power must be between {min} and {max}, got {n}", min = MIN_POWER, max = MAX_POWER)]
    PowerOutOfRange { n: u32 },
    #[error("zoom coefficient must be greater than zero, got {zoom}")]
    ZoomNotPositive { zoom: f64 },
    #[error("camera pitch must be within ±{max} degrees, got {pitch}", max = MAX_PITCH_DEGREES)]
    PitchOutOfRange { pitch: f64 },
    #[error("camera distance must be greater than zero, got {distance}")]
    DistanceNotPositive { distance: f64 },
    #[error(transparent)]
    UnknownKind(#[from] UnknownFractalKind),
}

/// Which of the two colours a UI control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourSlot {
    Fractal,
    Ambience,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub enabled: bool,
    #[serde(rename = "speed")]
    pub speed_degrees_per_sec: f64,
    #[serde(rename = "angle", default)]
    pub angle_degrees: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            enabled: false,
            speed_degrees_per_sec: DEFAULT_ROTATION_SPEED,
            angle_degrees: 0.0,
        }
    }
}

/// Unvalidated field set, also the on-disk shape of a fractal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub n: u32,
    #[serde(rename = "type")]
    pub kind: FractalKind,
    #[serde(rename = "fractalColor")]
    pub fractal_colour: Colour,
    #[serde(rename = "ambienceColor")]
    pub ambience_colour: Colour,
    pub camera: Camera,
    pub zoom_coefficient: f64,
    pub rotation: Rotation,
}

impl Default for FractalRecord {
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            n: DEFAULT_POWER,
            kind: FractalKind::default(),
            fractal_colour: Colour::rgb(0xff, 0x8c, 0x1a),
            ambience_colour: Colour::rgb(0x00, 0x00, 0x33),
            camera: Camera::default(),
            zoom_coefficient: 1.0,
            rotation: Rotation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParameters {
    record: FractalRecord,
}

fn require_finite(field: &'static str, value: f64) -> Result<f64, ParamsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamsError::NonFinite { field, value })
    }
}

/// Wraps into `[0, 360)`.
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

impl TryFrom<FractalRecord> for FractalParameters {
    type Error = ParamsError;

    fn try_from(mut record: FractalRecord) -> Result<Self, Self::Error> {
        require_finite("a", record.a)?;
        require_finite("b", record.b)?;
        require_finite("c", record.c)?;

        if !(MIN_POWER..=MAX_POWER).contains(&record.n) {
            return Err(ParamsError::PowerOutOfRange { n: record.n });
        }

        let zoom = require_finite("zoomCoefficient", record.zoom_coefficient)?;
        if zoom <= 0.0 {
            return Err(ParamsError::ZoomNotPositive { zoom });
        }

        let camera = record.camera;
        require_finite("camera.yaw", camera.yaw_degrees)?;
        let pitch = require_finite("camera.pitch", camera.pitch_degrees)?;
        if pitch.abs() > MAX_PITCH_DEGREES {
            return Err(ParamsError::PitchOutOfRange { pitch });
        }
        let distance = require_finite("camera.distance", camera.distance)?;
        if distance <= 0.0 {
            return Err(ParamsError::DistanceNotPositive { distance });
        }

        require_finite("rotation.speed", record.rotation.speed_degrees_per_sec)?;
        let angle = require_finite("rotation.angle", record.rotation.angle_degrees)?;
        record.rotation.angle_degrees = wrap_degrees(angle);

        Ok(Self { record })
    }
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            record: FractalRecord::default(),
        }
    }
}

impl FractalParameters {
    #[must_use]
    pub fn a(&self) -> f64 {
        self.record.a
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.record.b
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.record.c
    }

    #[must_use]
    pub fn power(&self) -> u32 {
        self.record.n
    }

    #[must_use]
    pub fn kind(&self) -> FractalKind {
        self.record.kind
    }

    #[must_use]
    pub fn colour(&self, slot: ColourSlot) -> Colour {
        match slot {
            ColourSlot::Fractal => self.record.fractal_colour,
            ColourSlot::Ambience => self.record.ambience_colour,
        }
    }

    #[must_use]
    pub fn fractal_colour(&self) -> Colour {
        self.colour(ColourSlot::Fractal)
    }

    #[must_use]
    pub fn ambience_colour(&self) -> Colour {
        self.colour(ColourSlot::Ambience)
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.record.camera
    }

    #[must_use]
    pub fn zoom_coefficient(&self) -> f64 {
        self.record.zoom_coefficient
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.record.rotation
    }

    #[must_use]
    pub fn to_record(&self) -> FractalRecord {
        self.record
    }

    /// Applies `edit` to a copy of the fields and validates the result.
    pub fn updated(
        &self,
        edit: impl FnOnce(&mut FractalRecord),
    ) -> Result<Self, ParamsError> {
        let mut record = self.record;
        edit(&mut record);
        Self::try_from(record)
    }

    /// Sets the type from a UI index, rejecting indices with no matching variant.
    pub fn with_kind_index(&self, index: u32) -> Result<Self, ParamsError> {
        let kind = FractalKind::try_from(index)?;
        self.updated(|r| r.kind = kind)
    }

    #[must_use]
    pub fn with_colour(&self, slot: ColourSlot, colour: Colour) -> Self {
        let mut record = self.record;
        match slot {
            ColourSlot::Fractal => record.fractal_colour = colour,
            ColourSlot::Ambience => record.ambience_colour = colour,
        }
        Self { record }
    }

    /// Moving the speed control also switches rotation on.
    pub fn with_rotation_speed(&self, speed_degrees_per_sec: f64) -> Result<Self, ParamsError> {
        self.updated(|r| {
            r.rotation.speed_degrees_per_sec = speed_degrees_per_sec;
            r.rotation.enabled = true;
        })
    }

    #[must_use]
    pub fn with_rotation_enabled(&self, enabled: bool) -> Self {
        let mut record = self.record;
        record.rotation.enabled = enabled;
        Self { record }
    }

    /// Angle after `dt_secs` of rotation. Returns `self` unchanged while rotation is off.
    #[must_use]
    pub fn advanced_rotation(&self, dt_secs: f64) -> Self {
        let rotation = self.record.rotation;
        if !rotation.enabled {
            return *self;
        }

        let angle = rotation.angle_degrees + rotation.speed_degrees_per_sec * dt_secs;
        if !angle.is_finite() {
            return *self;
        }

        let mut record = self.record;
        record.rotation.angle_degrees = wrap_degrees(angle);
        Self { record }
    }

    /// Next zoom level of the zoom button: ×1.5, back to 1 once past 8.
    #[must_use]
    pub fn zoom_step(&self) -> Self {
        let next = self.record.zoom_coefficient * ZOOM_STEP;
        let mut record = self.record;
        record.zoom_coefficient = if next > MAX_STEPPED_ZOOM { 1.0 } else { next };
        Self { record }
    }

    /// Random shape and colours; camera, zoom and rotation are kept.
    #[must_use]
    pub fn randomized(&self, rng: &mut fastrand::Rng) -> Self {
        let coefficient = || (rng.f64() * 2.0 - 1.0) * RANDOM_COEFFICIENT_RANGE;
        let (a, b, c) = (coefficient(), coefficient(), coefficient());

        let mut record = self.record;
        record.a = a;
        record.b = b;
        record.c = c;
        record.n = 2 * rng.u32(1..=RANDOM_MAX_POWER / 2);
        record.kind = FractalKind::ALL[rng.usize(..FractalKind::ALL.len())];
        record.fractal_colour = Colour::rgb(rng.u8(..), rng.u8(..), rng.u8(..));
        record.ambience_colour = Colour::rgb(rng.u8(..), rng.u8(..), rng.u8(..));
        Self { record }
    }
}

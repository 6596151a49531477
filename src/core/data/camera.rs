use serde::{Deserialize, Serialize};

pub const DEFAULT_CAMERA_DISTANCE: f64 = 3.0;
pub const DEFAULT_CAMERA_PITCH_DEGREES: f64 = 20.0;

/// Orbit camera looking at the origin.
///
/// Yaw turns about the vertical axis, positive pitch looks down from above. The rotation
/// animation is applied on top of `yaw_degrees` and never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    #[serde(rename = "yaw")]
    pub yaw_degrees: f64,
    #[serde(rename = "pitch")]
    pub pitch_degrees: f64,
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            yaw_degrees: 0.0,
            pitch_degrees: DEFAULT_CAMERA_PITCH_DEGREES,
            distance: DEFAULT_CAMERA_DISTANCE,
        }
    }
}

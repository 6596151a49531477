use glam::{DMat3, DVec3};

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

/// Vertical field of view at zoom 1.
pub const BASE_FOV_DEGREES: f64 = 50.0;
/// Keeps directions finite as the zoom coefficient approaches zero.
pub const MAX_FOV_TAN: f64 = 1.0e6;

/// Key light in camera space: upper left, towards the viewer.
const LIGHT_IN_VIEW: DVec3 = DVec3::new(-0.4, 0.7, 0.6);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit length.
    pub direction: DVec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Half-angle tangent of the field of view for a zoom coefficient.
#[must_use]
pub fn fov_tangent(zoom_coefficient: f64) -> f64 {
    let tangent = (BASE_FOV_DEGREES.to_radians() * 0.5).tan() / zoom_coefficient;

    if tangent.is_finite() {
        tangent.min(MAX_FOV_TAN)
    } else {
        MAX_FOV_TAN
    }
}

/// Pixel → world ray mapping for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    orientation: DMat3,
    eye: DVec3,
    fov_tan: f64,
    resolution: Resolution,
}

impl ViewTransform {
    #[must_use]
    pub fn new(params: &FractalParameters, resolution: Resolution) -> Self {
        let camera = params.camera();
        let yaw = (camera.yaw_degrees + params.rotation().angle_degrees).to_radians();
        let pitch = camera.pitch_degrees.to_radians();

        let orientation = DMat3::from_rotation_y(yaw) * DMat3::from_rotation_x(-pitch);
        let eye = orientation * DVec3::new(0.0, 0.0, camera.distance);

        Self {
            orientation,
            eye,
            fov_tan: fov_tangent(params.zoom_coefficient()),
            resolution,
        }
    }

    #[must_use]
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn light_direction(&self) -> DVec3 {
        (self.orientation * LIGHT_IN_VIEW).normalize()
    }

    /// Ray through the centre of `pixel`; +y is up in the image, the camera looks down -z.
    #[must_use]
    pub fn ray_for_pixel(&self, pixel: Point) -> Ray {
        let width = f64::from(self.resolution.width());
        let height = f64::from(self.resolution.height());

        let ndc_x =
            ((f64::from(pixel.x) + 0.5) / width * 2.0 - 1.0) * self.resolution.aspect_ratio();
        let ndc_y = 1.0 - (f64::from(pixel.y) + 0.5) / height * 2.0;

        let local = DVec3::new(ndc_x * self.fov_tan, ndc_y * self.fov_tan, -1.0).normalize();

        Ray {
            origin: self.eye,
            direction: self.orientation * local,
        }
    }
}

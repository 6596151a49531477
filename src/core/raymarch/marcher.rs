use glam::DVec3;

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::render_settings::RenderSettings;
use crate::core::fractals::distance_estimator::estimate;
use crate::core::raymarch::camera_rays::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    Hit {
        point: DVec3,
        /// Distance travelled along the ray.
        distance: f64,
        /// Steps taken before the hit; feeds step-count occlusion.
        steps: u32,
    },
    Miss,
}

impl HitResult {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, HitResult::Hit { .. })
    }
}

/// Sphere-traces `ray` against the surface described by `params`.
///
/// The hit threshold grows with `t` so distant surfaces need no more precision than a pixel
/// can show. Rays that overshoot `|origin| + max_distance`, meet a non-finite estimate or
/// run out of steps are misses.
#[must_use]
pub fn march(ray: &Ray, params: &FractalParameters, settings: &RenderSettings) -> HitResult {
    let limit = ray.origin.length() + settings.max_distance;
    let mut t = 0.0;

    for step in 0..settings.max_steps {
        let point = ray.at(t);
        let d = estimate(point, params, settings).distance;

        if !d.is_finite() {
            return HitResult::Miss;
        }

        if d < settings.hit_epsilon * (1.0 + t) {
            return HitResult::Hit {
                point,
                distance: t,
                steps: step,
            };
        }

        t += d * settings.step_damping;
        if t > limit {
            return HitResult::Miss;
        }
    }

    HitResult::Miss
}

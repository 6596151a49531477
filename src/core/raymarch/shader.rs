use glam::DVec3;

use crate::core::data::colour::Colour;
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::render_settings::RenderSettings;
use crate::core::fractals::distance_estimator::estimate;
use crate::core::raymarch::camera_rays::Ray;
use crate::core::raymarch::marcher::HitResult;

/// Light the surface receives even when facing away from the key light.
pub const AMBIENT_FILL: f64 = 0.15;
pub const DIFFUSE_WEIGHT: f64 = 0.85;
/// Share of the ambience colour added on top of lit surfaces.
pub const AMBIENCE_WEIGHT: f64 = 0.25;

/// Central-difference gradient of the distance estimate at `point`.
///
/// Deep inside the set every sample is zero; `fallback` is returned then.
#[must_use]
pub fn surface_normal(
    point: DVec3,
    fallback: DVec3,
    params: &FractalParameters,
    settings: &RenderSettings,
) -> DVec3 {
    let h = settings.normal_offset;
    let de = |p: DVec3| estimate(p, params, settings).distance;
    let axis = |unit: DVec3| de(point + unit * h) - de(point - unit * h);

    let normal = DVec3::new(axis(DVec3::X), axis(DVec3::Y), axis(DVec3::Z)).normalize_or_zero();

    if normal == DVec3::ZERO { fallback } else { normal }
}

/// Colours one marched ray. Misses are exactly the ambience colour.
#[must_use]
pub fn shade(
    hit: &HitResult,
    ray: &Ray,
    light_direction: DVec3,
    params: &FractalParameters,
    settings: &RenderSettings,
) -> Colour {
    let HitResult::Hit { point, steps, .. } = *hit else {
        return params.ambience_colour();
    };

    let normal = surface_normal(point, -ray.direction, params, settings);
    let diffuse = normal.dot(light_direction).max(0.0);
    let occlusion =
        1.0 - settings.occlusion_strength * f64::from(steps) / f64::from(settings.max_steps);
    let light = occlusion * (AMBIENT_FILL + DIFFUSE_WEIGHT * diffuse);

    let fractal = params.fractal_colour().to_unit();
    let ambience = params.ambience_colour().to_unit();

    Colour::from_unit([
        fractal[0] * light + AMBIENCE_WEIGHT * ambience[0],
        fractal[1] * light + AMBIENCE_WEIGHT * ambience[1],
        fractal[2] * light + AMBIENCE_WEIGHT * ambience[2],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::fractal_params::ColourSlot;

    fn params() -> FractalParameters {
        FractalParameters::default()
            .with_colour(ColourSlot::Fractal, Colour::rgb(0xff, 0x00, 0x00))
            .with_colour(ColourSlot::Ambience, Colour::rgb(0x00, 0x00, 0x33))
    }

    fn towards_origin() -> Ray {
        Ray {
            origin: DVec3::new(0.0, 0.0, 3.0),
            direction: DVec3::NEG_Z,
        }
    }

    #[test]
    fn miss_is_exactly_the_ambience_colour() {
        let colour = shade(
            &HitResult::Miss,
            &towards_origin(),
            DVec3::Y,
            &params(),
            &RenderSettings::default(),
        );

        assert_eq!(colour, Colour::rgb(0x00, 0x00, 0x33));
    }

    #[test]
    fn normal_points_outwards_on_the_pole() {
        let normal = surface_normal(
            DVec3::new(0.0, 0.0, 1.2),
            DVec3::X,
            &FractalParameters::default(),
            &RenderSettings::default(),
        );

        assert!(normal.z > 0.9, "normal {normal:?}");
        assert!((normal.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn interior_normal_falls_back() {
        let normal = surface_normal(
            DVec3::ZERO,
            DVec3::NEG_Y,
            &FractalParameters::default(),
            &RenderSettings::default(),
        );

        assert_eq!(normal, DVec3::NEG_Y);
    }

    #[test]
    fn lit_hit_carries_fractal_colour() {
        let hit = HitResult::Hit {
            point: DVec3::new(0.0, 0.0, 1.2),
            distance: 1.8,
            steps: 0,
        };

        let colour = shade(
            &hit,
            &towards_origin(),
            DVec3::Z,
            &params(),
            &RenderSettings::default(),
        );

        assert!(colour.r > 200, "{colour}");
        assert_eq!(colour.g, 0);
    }

    #[test]
    fn more_steps_darken_the_surface() {
        let settings = RenderSettings::default();
        let hit = |steps| HitResult::Hit {
            point: DVec3::new(0.0, 0.0, 1.2),
            distance: 1.8,
            steps,
        };

        let quick = shade(&hit(2), &towards_origin(), DVec3::Z, &params(), &settings);
        let slow = shade(
            &hit(settings.max_steps - 1),
            &towards_origin(),
            DVec3::Z,
            &params(),
            &settings,
        );

        assert!(slow.r < quick.r);
    }
}

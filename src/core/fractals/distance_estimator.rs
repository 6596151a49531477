//! Escape-time distance estimation for the bulb family.
//!
//! Every variant iterates `z ← f(z) + k` with a power-`n` map `f` and tracks the
//! running derivative `dr`. On escape the classic bound
//! `0.5 · ln(r) · r / dr` is returned; points that never escape are interior and
//! report a distance of zero.

use glam::DVec3;

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::render_settings::RenderSettings;
use crate::core::fractals::fractal_kinds::FractalKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeSample {
    /// Lower bound on the distance to the surface. Zero inside the set.
    pub distance: f64,
    /// Map applications performed, never more than the configured budget.
    pub iterations: u32,
    pub escaped: bool,
}

type PowerMap = fn(DVec3, f64, i32) -> DVec3;

/// Spherical power map: θ measured from the +z pole.
fn bulb_map(z: DVec3, r: f64, n: i32) -> DVec3 {
    let nf = f64::from(n);
    let theta = (z.z / r).clamp(-1.0, 1.0).acos() * nf;
    let phi = z.y.atan2(z.x) * nf;
    let rn = r.powi(n);

    DVec3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    ) * rn
}

/// Latitude form: θ measured from the equator.
fn cosine_map(z: DVec3, r: f64, n: i32) -> DVec3 {
    let nf = f64::from(n);
    let theta = (z.z / r).clamp(-1.0, 1.0).asin() * nf;
    let phi = z.y.atan2(z.x) * nf;
    let rn = r.powi(n);

    DVec3::new(
        theta.cos() * phi.cos(),
        theta.cos() * phi.sin(),
        -theta.sin(),
    ) * rn
}

fn burning_map(z: DVec3, r: f64, n: i32) -> DVec3 {
    bulb_map(z.abs(), r, n)
}

fn power_map_for(kind: FractalKind) -> PowerMap {
    match kind {
        FractalKind::Mandelbulb | FractalKind::Juliabulb => bulb_map,
        FractalKind::CosineBulb => cosine_map,
        FractalKind::BurningBulb => burning_map,
    }
}

fn escape_distance(r: f64, dr: f64) -> f64 {
    0.5 * r.ln() * r / dr
}

/// Estimates the distance from `point` to the surface selected by `params`.
///
/// Pure and allocation-free; safe to call from any number of threads.
#[must_use]
pub fn estimate(point: DVec3, params: &FractalParameters, settings: &RenderSettings) -> DeSample {
    let n = params.power() as i32;
    let nf = f64::from(n);
    let offset = DVec3::new(params.a(), params.b(), params.c());
    let map = power_map_for(params.kind());

    // Julia sets use a fixed constant, so the derivative gets no +1 term.
    let (constant, derivative_bias) = match params.kind() {
        FractalKind::Juliabulb => (offset, 0.0),
        FractalKind::Mandelbulb | FractalKind::CosineBulb | FractalKind::BurningBulb => {
            (point + offset, 1.0)
        }
    };

    let mut z = point;
    let mut dr = 1.0;

    for iteration in 0..settings.max_iterations {
        let r = z.length();
        if r > settings.bailout {
            return DeSample {
                distance: escape_distance(r, dr),
                iterations: iteration,
                escaped: true,
            };
        }

        dr = nf * r.powi(n - 1) * dr + derivative_bias;
        let mapped = if r > 0.0 { map(z, r, n) } else { DVec3::ZERO };
        z = mapped + constant;
    }

    let r = z.length();
    if r > settings.bailout {
        return DeSample {
            distance: escape_distance(r, dr),
            iterations: settings.max_iterations,
            escaped: true,
        };
    }

    DeSample {
        distance: 0.0,
        iterations: settings.max_iterations,
        escaped: false,
    }
}

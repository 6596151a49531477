use crate::core::actions::render_frame::ports::pixel_algorithm::PixelAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::point::Point;
use crate::core::data::render_settings::RenderSettings;
use crate::core::data::resolution::Resolution;
use crate::core::raymarch::camera_rays::ViewTransform;
use crate::core::raymarch::marcher::{HitResult, march};
use crate::core::raymarch::shader::shade;

/// Camera ray → sphere trace → shade, for one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RaymarchAlgorithm<'a> {
    params: &'a FractalParameters,
    settings: &'a RenderSettings,
    view: ViewTransform,
}

impl<'a> RaymarchAlgorithm<'a> {
    #[must_use]
    pub fn new(
        params: &'a FractalParameters,
        settings: &'a RenderSettings,
        resolution: Resolution,
    ) -> Self {
        Self {
            params,
            settings,
            view: ViewTransform::new(params, resolution),
        }
    }

    #[must_use]
    pub fn trace(&self, pixel: Point) -> HitResult {
        march(&self.view.ray_for_pixel(pixel), self.params, self.settings)
    }
}

impl PixelAlgorithm for RaymarchAlgorithm<'_> {
    type Output = Colour;

    fn compute(&self, pixel: Point) -> Self::Output {
        let ray = self.view.ray_for_pixel(pixel);
        let hit = march(&ray, self.params, self.settings);

        shade(&hit, &ray, self.view.light_direction(), self.params, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_pixel_hits_and_corner_misses() {
        let params = FractalParameters::default();
        let settings = RenderSettings::default();
        let algorithm =
            RaymarchAlgorithm::new(&params, &settings, Resolution::new(33, 33).unwrap());

        assert!(algorithm.trace(Point { x: 16, y: 16 }).is_hit());
        assert_eq!(algorithm.trace(Point { x: 0, y: 0 }), HitResult::Miss);
    }

    #[test]
    fn missed_pixel_is_the_ambience_colour() {
        let params = FractalParameters::default();
        let settings = RenderSettings::default();
        let algorithm =
            RaymarchAlgorithm::new(&params, &settings, Resolution::new(33, 33).unwrap());

        assert_eq!(algorithm.compute(Point { x: 0, y: 0 }), params.ambience_colour());
    }
}

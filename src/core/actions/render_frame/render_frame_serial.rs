use crate::core::actions::render_frame::ports::pixel_algorithm::PixelAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

/// Single-threaded reference: row-major, one output per pixel.
pub fn render_frame_serial<Alg: PixelAlgorithm>(
    resolution: Resolution,
    algorithm: &Alg,
) -> Vec<Alg::Output> {
    (0..resolution.height())
        .flat_map(|y| (0..resolution.width()).map(move |x| Point { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

use crate::core::data::point::Point;

/// Per-pixel computation shared across render threads.
pub trait PixelAlgorithm {
    type Output;

    fn compute(&self, pixel: Point) -> Self::Output;
}

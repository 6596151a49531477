use thiserror::Error;

use crate::core::data::point::Point;

/// Upper bound per axis; keeps `width * height * 3` well inside `usize` on every target.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("resolution must be between 1x1 and {max}x{max}: got {width}x{height}", max = MAX_DIMENSION)]
    InvalidSize { width: u32, height: u32 },
}

/// Target image size in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        let valid = |v: u32| (1..=MAX_DIMENSION).contains(&v);

        if !valid(width) || !valid(height) {
            return Err(ResolutionError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_new_valid() {
        let resolution = Resolution::new(800, 600).unwrap();

        assert_eq!(resolution.width(), 800);
        assert_eq!(resolution.height(), 600);
        assert_eq!(resolution.pixel_count(), 480_000);
    }

    #[test]
    fn test_single_pixel_is_allowed() {
        assert!(Resolution::new(1, 1).is_ok());
    }

    #[test]
    fn test_zero_or_oversized_dimensions_are_rejected() {
        assert_eq!(
            Resolution::new(0, 10),
            Err(ResolutionError::InvalidSize { width: 0, height: 10 })
        );
        assert_eq!(
            Resolution::new(10, 0),
            Err(ResolutionError::InvalidSize { width: 10, height: 0 })
        );
        assert!(Resolution::new(MAX_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn test_contains_point() {
        let resolution = Resolution::new(4, 3).unwrap();

        assert!(resolution.contains_point(Point { x: 0, y: 0 }));
        assert!(resolution.contains_point(Point { x: 3, y: 2 }));
        assert!(!resolution.contains_point(Point { x: 4, y: 2 }));
        assert!(!resolution.contains_point(Point { x: 3, y: 3 }));
    }

    #[test]
    fn test_aspect_ratio() {
        let resolution = Resolution::new(200, 100).unwrap();

        assert!((resolution.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }
}

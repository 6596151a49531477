use rayon::prelude::*;

use crate::core::actions::render_frame::ports::pixel_algorithm::PixelAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

/// Renders a frame on rayon's work-stealing pool, one task per row.
///
/// The algorithm is shared by reference across all workers, so it must be `Sync`.
/// Output is row-major and identical to [`render_frame_serial`].
///
/// [`render_frame_serial`]: crate::core::actions::render_frame::render_frame_serial::render_frame_serial
pub fn render_frame_parallel_rayon<Alg>(
    resolution: Resolution,
    algorithm: &Alg,
) -> Vec<Alg::Output>
where
    Alg: PixelAlgorithm + Sync,
    Alg::Output: Send,
{
    let width = resolution.width();

    let rows: Vec<Vec<Alg::Output>> = (0..resolution.height())
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| algorithm.compute(Point { x, y }))
                .collect()
        })
        .collect();

    rows.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::render_frame::render_frame_serial::render_frame_serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubAlgorithm {}

    impl PixelAlgorithm for StubAlgorithm {
        type Output = u64;

        fn compute(&self, pixel: Point) -> Self::Output {
            u64::from(pixel.x) * 1_000 + u64::from(pixel.y)
        }
    }

    struct CountingAlgorithm {
        calls: AtomicUsize,
    }

    impl PixelAlgorithm for CountingAlgorithm {
        type Output = ();

        fn compute(&self, _: Point) -> Self::Output {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_rayon_generates_same_results_as_serial() {
        let resolution = Resolution::new(11, 9).unwrap();

        let serial = render_frame_serial(resolution, &StubAlgorithm {});
        let rayon = render_frame_parallel_rayon(resolution, &StubAlgorithm {});

        assert_eq!(rayon, serial);
    }

    #[test]
    fn test_rayon_with_single_pixel() {
        let resolution = Resolution::new(1, 1).unwrap();

        assert_eq!(render_frame_parallel_rayon(resolution, &StubAlgorithm {}), vec![0]);
    }

    #[test]
    fn test_rayon_with_large_frame() {
        let resolution = Resolution::new(101, 67).unwrap();

        let serial = render_frame_serial(resolution, &StubAlgorithm {});
        let rayon = render_frame_parallel_rayon(resolution, &StubAlgorithm {});

        assert_eq!(rayon, serial);
    }

    #[test]
    fn test_rayon_computes_each_pixel_once() {
        let resolution = Resolution::new(40, 30).unwrap();
        let algorithm = CountingAlgorithm {
            calls: AtomicUsize::new(0),
        };

        let results = render_frame_parallel_rayon(resolution, &algorithm);

        assert_eq!(results.len(), 1_200);
        assert_eq!(algorithm.calls.load(Ordering::Relaxed), 1_200);
    }
}

pub mod distance_estimator;
pub mod fractal_kinds;

//! Per-pixel image formation: camera rays, sphere tracing and shading.

pub mod algorithm;
pub mod camera_rays;
pub mod marcher;
pub mod shader;

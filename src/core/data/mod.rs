pub mod camera;
pub mod colour;
pub mod fractal_params;
pub mod pixel_buffer;
pub mod point;
pub mod render_settings;
pub mod resolution;

//! Seams between the interactive controller and the outside world.

pub mod frame_renderer;
pub mod presenter_port;

pub mod ports;
pub mod render_frame_parallel_rayon;
pub mod render_frame_serial;

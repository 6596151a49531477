//! Interactive rendering: a worker thread that turns parameter snapshots into frames.
//!
//! The controller follows the ports & adapters pattern:
//! - **Input**: parameter snapshots plus a target resolution, and rotation ticks
//! - **Output**: [`PresenterPort`] receives finished frames or failures
//! - **Core**: [`FrameRenderer`] wraps the raymarching pipeline from `core/`

pub mod animation;
mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
mod raymarch_renderer;

pub use controller::InteractiveController;
pub use events::render_event::RenderEvent;
pub use ports::frame_renderer::FrameRenderer;
pub use ports::presenter_port::PresenterPort;
pub use raymarch_renderer::RaymarchRenderer;

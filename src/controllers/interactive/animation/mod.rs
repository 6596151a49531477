pub mod rotation_clock;
pub mod scheduler;

pub use rotation_clock::{RotationClock, TickResult};
pub use scheduler::{Completion, FrameScheduler, SchedulerAction, SchedulerState};

pub mod limits;

pub use limits::AnimationLimits;

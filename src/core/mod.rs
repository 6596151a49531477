pub mod actions;
pub mod animation;
pub mod data;
pub mod fractals;
pub mod raymarch;

//! Adoption diffusion models.

mod bass;

pub use bass::{bass_increment, BassDiffusion};

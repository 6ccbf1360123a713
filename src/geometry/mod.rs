pub mod scaling;
pub mod ticks;

pub use scaling::{Bounds, Scaler};
pub use ticks::{format_tick, nice_step, ticks};

//! Platform abstraction layer
//!
//! Turns host events into simulation inputs:
//! - Time: host timestamps to clamped per-tick deltas
//! - Input: held keys to a `TickInput` snapshot

pub mod input;
pub mod time;

pub use input::{Key, KeyboardState};
pub use time::FrameClock;

//! Rendering boundary
//!
//! The simulation never draws. Each frame the host captures a
//! `RenderSnapshot` (ordered drawables plus HUD data) and either walks it
//! directly or packs it into GPU instance data.

pub mod instance;
pub mod snapshot;

pub use instance::{DrawInstance, instance_bytes, pack_instances};
pub use snapshot::{DrawKind, Drawable, Hud, RenderSnapshot};

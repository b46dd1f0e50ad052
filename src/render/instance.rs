//! GPU instance packing for snapshot drawables

use bytemuck::{Pod, Zeroable};

use super::snapshot::{DrawKind, Drawable, RenderSnapshot};
use crate::rgb_to_rgba;
use crate::sim::entities::{EnemyKind, PowerUpKind};

/// Set on `flags` while the player blink is in its off phase
pub const FLAG_FLASH: u32 = 1;

/// Per-instance data for a quad shader. 64 bytes, 16-byte aligned fields.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    /// Linear RGBA, alpha already applied
    pub color: [f32; 4],
    pub rotation: f32,
    pub pulse: f32,
    /// Health-bar fill, negative when no bar is drawn
    pub health: f32,
    pub kind: u32,
    pub flags: u32,
    _pad: [u32; 3],
}

impl DrawInstance {
    pub fn from_drawable(drawable: &Drawable) -> Self {
        Self {
            pos: drawable.pos.to_array(),
            size: drawable.size.to_array(),
            color: rgb_to_rgba(drawable.color, drawable.alpha),
            rotation: drawable.rotation,
            pulse: drawable.pulse,
            health: drawable.health_ratio.unwrap_or(-1.0),
            kind: kind_code(drawable.kind),
            flags: if drawable.flash { FLAG_FLASH } else { 0 },
            _pad: [0; 3],
        }
    }
}

/// Shader-side id for each drawable kind
pub const fn kind_code(kind: DrawKind) -> u32 {
    match kind {
        DrawKind::Player => 0,
        DrawKind::Enemy(EnemyKind::Fighter) => 1,
        DrawKind::Enemy(EnemyKind::Asteroid) => 2,
        DrawKind::Enemy(EnemyKind::Interceptor) => 3,
        DrawKind::PlayerBullet => 4,
        DrawKind::EnemyBullet => 5,
        DrawKind::PowerUp(PowerUpKind::Health) => 6,
        DrawKind::PowerUp(PowerUpKind::Ammo) => 7,
        DrawKind::PowerUp(PowerUpKind::Weapon) => 8,
        DrawKind::PowerUp(PowerUpKind::Shield) => 9,
        DrawKind::Particle => 10,
        DrawKind::Shard => 11,
    }
}

/// Pack a snapshot's drawables in draw order
pub fn pack_instances(snapshot: &RenderSnapshot) -> Vec<DrawInstance> {
    snapshot.drawables.iter().map(DrawInstance::from_drawable).collect()
}

/// Raw bytes ready for a vertex buffer upload
pub fn instance_bytes(instances: &[DrawInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

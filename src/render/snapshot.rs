//! Read-only view of a frame for the presentation layer

use glam::Vec2;
use serde::Serialize;

use crate::consts::WEAPON_NAME;
use crate::sim::entities::{Enemy, EnemyKind, Player, PowerUpKind, palette};
use crate::sim::{GamePhase, GameState, Rect};

/// Player flash toggles every this many ms of remaining invulnerability
const FLASH_PERIOD_MS: f32 = 100.0;

/// What a drawable depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawKind {
    Player,
    Enemy(EnemyKind),
    PlayerBullet,
    EnemyBullet,
    PowerUp(PowerUpKind),
    Particle,
    /// Fragment of an explosion
    Shard,
}

/// One box to draw, in arena coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawable {
    pub kind: DrawKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Radians
    pub rotation: f32,
    /// Power-up pulse phase
    pub pulse: f32,
    /// Player is in the "off" half of its invulnerability blink
    pub flash: bool,
    /// Health-bar fill for multi-hit enemies
    pub health_ratio: Option<f32>,
    /// 1.0 opaque, fades to 0 for particles and explosions
    pub alpha: f32,
}

impl Drawable {
    fn new(kind: DrawKind, pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            kind,
            pos,
            size,
            color,
            rotation: 0.0,
            pulse: 0.0,
            flash: false,
            health_ratio: None,
            alpha: 1.0,
        }
    }

    fn player(player: &Player) -> Self {
        let flash = player.invulnerable && (player.invulnerability_ms / FLASH_PERIOD_MS) as u32 % 2 == 1;
        Self {
            flash,
            ..Self::new(DrawKind::Player, player.pos, player.size, palette::PLAYER)
        }
    }

    fn enemy(enemy: &Enemy) -> Self {
        Self {
            rotation: enemy.rotation,
            health_ratio: enemy.health_ratio(),
            ..Self::new(
                DrawKind::Enemy(enemy.kind),
                enemy.pos,
                enemy.size,
                enemy.kind.stats().color,
            )
        }
    }
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub level_name: String,
    pub lives: u32,
    /// 0..=1
    pub health_ratio: f32,
    /// 0..=1
    pub ammo_ratio: f32,
    pub weapon: &'static str,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub arena: Rect,
    pub hud: Hud,
    /// Back to front: player, enemies, player bullets, enemy bullets,
    /// power-ups, particles, explosion shards
    pub drawables: Vec<Drawable>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut drawables = Vec::with_capacity(
            1 + state.enemies.len()
                + state.player_bullets.len()
                + state.enemy_bullets.len()
                + state.power_ups.len()
                + state.particles.len(),
        );

        if let Some(player) = &state.player {
            drawables.push(Drawable::player(player));
        }
        drawables.extend(state.enemies.iter().map(Drawable::enemy));
        for bullet in &state.player_bullets {
            drawables.push(Drawable::new(DrawKind::PlayerBullet, bullet.pos, bullet.size, bullet.color()));
        }
        for bullet in &state.enemy_bullets {
            drawables.push(Drawable::new(DrawKind::EnemyBullet, bullet.pos, bullet.size, bullet.color()));
        }
        for power_up in &state.power_ups {
            drawables.push(Drawable {
                pulse: power_up.pulse,
                ..Drawable::new(
                    DrawKind::PowerUp(power_up.kind),
                    power_up.pos,
                    power_up.size,
                    power_up.kind.color(),
                )
            });
        }
        for particle in &state.particles {
            drawables.push(Drawable {
                alpha: particle.life.clamp(0.0, 1.0),
                ..Drawable::new(
                    DrawKind::Particle,
                    particle.pos,
                    Vec2::splat(particle.size),
                    particle.color,
                )
            });
        }
        for explosion in &state.explosions {
            let alpha = explosion.life.clamp(0.0, 1.0);
            for shard in &explosion.shards {
                drawables.push(Drawable {
                    alpha,
                    ..Drawable::new(
                        DrawKind::Shard,
                        explosion.pos + shard.offset,
                        Vec2::splat(shard.size),
                        shard.color,
                    )
                });
            }
        }

        Self {
            arena: state.arena,
            hud: Hud::capture(state),
            drawables,
        }
    }
}

impl Hud {
    fn capture(state: &GameState) -> Self {
        let (health_ratio, ammo_ratio) = state
            .player
            .as_ref()
            .map(|p| {
                (
                    (p.health / p.max_health).clamp(0.0, 1.0),
                    (p.ammo / p.max_ammo).clamp(0.0, 1.0),
                )
            })
            .unwrap_or((0.0, 0.0));
        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            level: state.level,
            level_name: state.level_config().map(|c| c.name.clone()).unwrap_or_default(),
            lives: state.lives,
            health_ratio,
            ammo_ratio,
            weapon: WEAPON_NAME,
        }
    }
}

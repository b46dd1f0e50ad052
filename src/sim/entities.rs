//! Gameplay entities and their per-tick update rules
//!
//! Entities are plain data plus an `update` that mutates only themselves.
//! Anything an update wants to create (bullets) is returned to the caller,
//! and removal is a `dead` flag that the tick compacts at the end of a frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Boxed, Rect};
use super::rng::SimRng;
use super::tick::TickInput;
use crate::consts::*;
use crate::frames;

/// Colors (0xRRGGBB) handed to the renderer
pub mod palette {
    pub const PLAYER: u32 = 0x00ffff;
    pub const PLAYER_BULLET: u32 = 0x00ffff;
    pub const ENEMY_BULLET: u32 = 0xff4444;
    pub const FIGHTER: u32 = 0xff4444;
    pub const ASTEROID: u32 = 0x888888;
    pub const INTERCEPTOR: u32 = 0xff00ff;
    pub const POWERUP_HEALTH: u32 = 0xff6666;
    pub const POWERUP_AMMO: u32 = 0x66ff66;
    pub const POWERUP_WEAPON: u32 = 0xffff66;
    pub const POWERUP_SHIELD: u32 = 0x6666ff;
    /// Bullet impacts and muzzle flash
    pub const SPARK: u32 = 0xffff00;
    pub const PLAYER_HURT: u32 = 0xff0000;
    pub const RESPAWN: u32 = 0x00ffff;
    pub const EXPLOSION_ENEMY: [u32; 3] = [0xff4444, 0xff8844, 0xffff44];
    pub const EXPLOSION_PLAYER: [u32; 3] = [0x4444ff, 0x44ffff, 0xffffff];
}

/// Common view used by compaction and snapshots
pub trait Entity {
    fn is_dead(&self) -> bool;
    fn position(&self) -> Vec2;
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {
        $(impl Entity for $ty {
            fn is_dead(&self) -> bool {
                self.dead
            }
            fn position(&self) -> Vec2 {
                self.pos
            }
        })*
    };
}

impl_entity!(Enemy, Bullet, PowerUp, Particle, Explosion);

// ── Player ──────────────────────────────────────────────────────────────────

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub ammo: f32,
    pub max_ammo: f32,
    /// Minimum milliseconds between shots
    pub fire_rate_ms: f32,
    /// Milliseconds since the last shot
    pub since_last_shot_ms: f32,
    pub invulnerable: bool,
    pub invulnerability_ms: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            ammo: PLAYER_MAX_AMMO,
            max_ammo: PLAYER_MAX_AMMO,
            fire_rate_ms: PLAYER_FIRE_RATE_MS,
            // Ready to fire immediately
            since_last_shot_ms: PLAYER_FIRE_RATE_MS,
            invulnerable: false,
            invulnerability_ms: 0.0,
        }
    }

    /// Default spawn point for an arena
    pub fn spawn_point(arena: &Rect) -> Vec2 {
        Vec2::new(arena.size.x / 2.0, arena.size.y - PLAYER_SPAWN_OFFSET)
    }

    /// Move, fire, tick down invulnerability and regenerate ammo.
    /// Returns the bullet fired this tick, if any.
    pub fn update(&mut self, dt_ms: f32, input: &TickInput, arena: &Rect) -> Option<Bullet> {
        let step = self.speed * frames(dt_ms);
        let mut delta = Vec2::ZERO;
        if input.left {
            delta.x -= step;
        }
        if input.right {
            delta.x += step;
        }
        if input.up {
            delta.y -= step;
        }
        if input.down {
            delta.y += step;
        }
        self.pos = arena.clamp_box(self.pos + delta, self.size);

        self.since_last_shot_ms += dt_ms;
        let bullet = if input.fire { self.try_fire() } else { None };

        if self.invulnerable {
            self.invulnerability_ms -= dt_ms;
            if self.invulnerability_ms <= 0.0 {
                self.invulnerability_ms = 0.0;
                self.invulnerable = false;
            }
        }

        if self.ammo < self.max_ammo {
            self.ammo = (self.ammo + dt_ms * AMMO_REGEN_PER_MS).min(self.max_ammo);
        }

        bullet
    }

    pub fn can_fire(&self) -> bool {
        self.since_last_shot_ms >= self.fire_rate_ms && self.ammo >= SHOT_AMMO_COST
    }

    /// Fire if the cooldown and ammo allow it
    pub fn try_fire(&mut self) -> Option<Bullet> {
        if !self.can_fire() {
            return None;
        }
        self.since_last_shot_ms = 0.0;
        self.ammo -= SHOT_AMMO_COST;
        Some(Bullet::player(self.muzzle()))
    }

    /// Where bullets leave the ship
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0, self.pos.y)
    }

    /// Apply damage unless invulnerable. Returns whether the hit landed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invulnerable {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.grant_invulnerability(HIT_INVULNERABILITY_MS);
        true
    }

    pub fn grant_invulnerability(&mut self, ms: f32) {
        self.invulnerable = true;
        self.invulnerability_ms = ms;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

impl Boxed for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Enemies ─────────────────────────────────────────────────────────────────

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Falls straight down and fires periodically
    Fighter,
    /// Slow, tough, spins, never fires
    Asteroid,
    /// Fast, weaves side to side and fires often
    Interceptor,
}

/// Fixed per-variant stats
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub size: f32,
    pub points: u64,
    pub contact_damage: f32,
    /// None for variants that never fire
    pub shoot_interval_ms: Option<f32>,
    pub color: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Fighter, EnemyKind::Asteroid, EnemyKind::Interceptor];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Fighter => EnemyStats {
                size: 30.0,
                points: 100,
                contact_damage: 20.0,
                shoot_interval_ms: Some(2000.0),
                color: palette::FIGHTER,
            },
            EnemyKind::Asteroid => EnemyStats {
                size: 40.0,
                points: 50,
                contact_damage: 30.0,
                shoot_interval_ms: None,
                color: palette::ASTEROID,
            },
            EnemyKind::Interceptor => EnemyStats {
                size: 25.0,
                points: 200,
                contact_damage: 25.0,
                shoot_interval_ms: Some(1500.0),
                color: palette::INTERCEPTOR,
            },
        }
    }

    /// Fall speed per reference frame at a level
    pub fn speed(self, level: u32) -> f32 {
        let level = level as f32;
        match self {
            EnemyKind::Fighter => 1.0 + level * 0.5,
            EnemyKind::Asteroid => 0.5 + level * 0.3,
            EnemyKind::Interceptor => 2.0 + level * 0.5,
        }
    }

    /// Starting health at a level
    pub fn health(self, level: u32) -> f32 {
        let level = level as f32;
        match self {
            EnemyKind::Fighter => level,
            EnemyKind::Asteroid => level * 2.0,
            EnemyKind::Interceptor => (level * 1.5).ceil(),
        }
    }
}

/// Radians an asteroid turns per reference frame
const ASTEROID_SPIN: f32 = 0.02;
/// Interceptor weave: phase advance per ms and lateral amplitude per frame
const ZIGZAG_RATE: f32 = 0.003;
const ZIGZAG_AMPLITUDE: f32 = 2.0;

/// An enemy ship or hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub points: u64,
    pub contact_damage: f32,
    pub shoot_timer_ms: f32,
    /// Interceptor weave phase
    pub zigzag: f32,
    /// Asteroid visual rotation (radians)
    pub rotation: f32,
    pub dead: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, level: u32) -> Self {
        let stats = kind.stats();
        let health = kind.health(level);
        Self {
            kind,
            pos,
            size: Vec2::splat(stats.size),
            speed: kind.speed(level),
            health,
            max_health: health,
            points: stats.points,
            contact_damage: stats.contact_damage,
            shoot_timer_ms: 0.0,
            zigzag: 0.0,
            rotation: 0.0,
            dead: false,
        }
    }

    /// Advance movement and weapon timers. Returns a bullet when the enemy fires.
    pub fn update(&mut self, dt_ms: f32, arena: &Rect) -> Option<Bullet> {
        let f = frames(dt_ms);
        self.pos.y += self.speed * f;

        match self.kind {
            EnemyKind::Asteroid => self.rotation += ASTEROID_SPIN * f,
            EnemyKind::Interceptor => {
                self.zigzag += dt_ms * ZIGZAG_RATE;
                self.pos.x += self.zigzag.sin() * ZIGZAG_AMPLITUDE * f;
            }
            EnemyKind::Fighter => {}
        }

        let bullet = self.kind.stats().shoot_interval_ms.and_then(|interval| {
            self.shoot_timer_ms += dt_ms;
            if self.shoot_timer_ms >= interval {
                self.shoot_timer_ms = 0.0;
                Some(Bullet::enemy(self.muzzle()))
            } else {
                None
            }
        });

        if self.pos.y > arena.max().y + ENEMY_OFFSCREEN_MARGIN {
            self.dead = true;
        }

        bullet
    }

    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y + self.size.y,
        )
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Health-bar fill, only for enemies that take more than one hit
    pub fn health_ratio(&self) -> Option<f32> {
        (self.max_health > 1.0).then(|| (self.health / self.max_health).clamp(0.0, 1.0))
    }
}

impl Boxed for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Bullets ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Velocity per reference frame
    pub vel: Vec2,
    pub owner: BulletOwner,
    pub damage: f32,
    pub size: Vec2,
    pub dead: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, owner: BulletOwner, damage: f32) -> Self {
        Self {
            pos,
            vel,
            owner,
            damage,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            dead: false,
        }
    }

    pub fn player(pos: Vec2) -> Self {
        Self::new(pos, Vec2::new(0.0, -PLAYER_BULLET_SPEED), BulletOwner::Player, PLAYER_BULLET_DAMAGE)
    }

    pub fn enemy(pos: Vec2) -> Self {
        Self::new(pos, Vec2::new(0.0, ENEMY_BULLET_SPEED), BulletOwner::Enemy, ENEMY_BULLET_DAMAGE)
    }

    /// Move and cull once outside `bounds`
    pub fn update(&mut self, dt_ms: f32, bounds: &Rect) {
        self.pos += self.vel * frames(dt_ms);
        if !bounds.contains_point(self.pos) {
            self.dead = true;
        }
    }

    pub fn color(&self) -> u32 {
        match self.owner {
            BulletOwner::Player => palette::PLAYER_BULLET,
            BulletOwner::Enemy => palette::ENEMY_BULLET,
        }
    }
}

impl Boxed for Bullet {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Power-ups ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores health
    Health,
    /// Refills ammo
    Ammo,
    /// Permanently shortens the fire cooldown
    Weapon,
    /// Temporary invulnerability
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Ammo,
        PowerUpKind::Weapon,
        PowerUpKind::Shield,
    ];

    pub const fn color(self) -> u32 {
        match self {
            PowerUpKind::Health => palette::POWERUP_HEALTH,
            PowerUpKind::Ammo => palette::POWERUP_AMMO,
            PowerUpKind::Weapon => palette::POWERUP_WEAPON,
            PowerUpKind::Shield => palette::POWERUP_SHIELD,
        }
    }

    /// Apply the effect to the player
    pub fn apply(self, player: &mut Player) {
        match self {
            PowerUpKind::Health => {
                player.health = (player.health + HEALTH_PICKUP_AMOUNT).min(player.max_health);
            }
            PowerUpKind::Ammo => player.ammo = player.max_ammo,
            PowerUpKind::Weapon => {
                player.fire_rate_ms = (player.fire_rate_ms - WEAPON_FIRE_RATE_STEP).max(MIN_FIRE_RATE_MS);
            }
            PowerUpKind::Shield => player.grant_invulnerability(SHIELD_DURATION_MS),
        }
    }
}

/// Pulse phase advance per ms
const PULSE_RATE: f32 = 0.005;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Render pulse phase (radians)
    pub pulse: f32,
    pub dead: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::splat(POWERUP_SIZE),
            speed: POWERUP_FALL_SPEED,
            pulse: 0.0,
            dead: false,
        }
    }

    /// Drop with a uniformly random kind
    pub fn random(pos: Vec2, rng: &mut dyn SimRng) -> Self {
        let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
        Self::new(kind, pos)
    }

    pub fn update(&mut self, dt_ms: f32, arena: &Rect) {
        self.pos.y += self.speed * frames(dt_ms);
        self.pulse += dt_ms * PULSE_RATE;
        if self.pos.y > arena.max().y + POWERUP_BOUNDS_MARGIN {
            self.dead = true;
        }
    }
}

impl Boxed for PowerUp {
    fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Cosmetics ───────────────────────────────────────────────────────────────

const PARTICLE_SPREAD: f32 = 3.0;
const PARTICLE_DECAY: f32 = 0.02;
const PARTICLE_SIZE: f32 = 3.0;

/// A short-lived spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 at birth, removed at 0
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub dead: bool,
}

impl Particle {
    pub fn new(pos: Vec2, color: u32, rng: &mut dyn SimRng) -> Self {
        let vel = Vec2::new(
            rng.range(-PARTICLE_SPREAD, PARTICLE_SPREAD),
            rng.range(-PARTICLE_SPREAD, PARTICLE_SPREAD),
        );
        Self {
            pos,
            vel,
            color,
            life: 1.0,
            decay: PARTICLE_DECAY,
            size: PARTICLE_SIZE,
            dead: false,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        let f = frames(dt_ms);
        self.pos += self.vel * f;
        self.life -= self.decay * f;
        if self.life <= 0.0 {
            self.dead = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Enemy,
    Player,
}

impl ExplosionKind {
    pub const fn shard_count(self) -> usize {
        match self {
            ExplosionKind::Enemy => 15,
            ExplosionKind::Player => 25,
        }
    }

    pub const fn palette(self) -> [u32; 3] {
        match self {
            ExplosionKind::Enemy => palette::EXPLOSION_ENEMY,
            ExplosionKind::Player => palette::EXPLOSION_PLAYER,
        }
    }
}

/// A fragment owned by an explosion, positioned relative to its origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    pub offset: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
}

const SHARD_SPREAD: f32 = 4.0;
const SHARD_DAMPING: f32 = 0.98;
const EXPLOSION_DECAY: f32 = 0.05;

/// A burst of shards sharing one fading lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub pos: Vec2,
    pub life: f32,
    pub decay: f32,
    pub shards: Vec<Shard>,
    pub dead: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, kind: ExplosionKind, rng: &mut dyn SimRng) -> Self {
        let colors = kind.palette();
        let shards = (0..kind.shard_count())
            .map(|_| Shard {
                offset: Vec2::ZERO,
                vel: Vec2::new(
                    rng.range(-SHARD_SPREAD, SHARD_SPREAD),
                    rng.range(-SHARD_SPREAD, SHARD_SPREAD),
                ),
                color: colors[rng.index(colors.len())],
                size: rng.range(2.0, 6.0),
            })
            .collect();
        Self {
            kind,
            pos,
            life: 1.0,
            decay: EXPLOSION_DECAY,
            shards,
            dead: false,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        let f = frames(dt_ms);
        self.life -= self.decay * f;
        let damping = SHARD_DAMPING.powf(f);
        for shard in &mut self.shards {
            shard.offset += shard.vel * f;
            shard.vel *= damping;
        }
        if self.life <= 0.0 {
            self.dead = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::testing::ScriptedRng;

    fn arena() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    #[test]
    fn test_enemy_stat_tables() {
        let fighter = Enemy::new(EnemyKind::Fighter, Vec2::ZERO, 2);
        assert_eq!(fighter.health, 2.0);
        assert_eq!(fighter.speed, 2.0);
        assert_eq!(fighter.points, 100);

        let asteroid = Enemy::new(EnemyKind::Asteroid, Vec2::ZERO, 3);
        assert_eq!(asteroid.health, 6.0);
        assert!((asteroid.speed - 1.4).abs() < 1e-5);
        assert_eq!(asteroid.contact_damage, 30.0);

        let interceptor = Enemy::new(EnemyKind::Interceptor, Vec2::ZERO, 3);
        assert_eq!(interceptor.health, 5.0);
        assert_eq!(interceptor.speed, 3.5);
        assert_eq!(interceptor.points, 200);
    }

    #[test]
    fn test_fighter_fires_every_two_seconds() {
        let mut enemy = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 0.0), 1);
        let mut shots = 0;
        for _ in 0..40 {
            if enemy.update(100.0, &arena()).is_some() {
                shots += 1;
            }
        }
        // 4000 ms elapsed
        assert_eq!(shots, 2);
        assert_eq!(enemy.shoot_timer_ms, 0.0);
    }

    #[test]
    fn test_asteroid_never_fires() {
        let mut enemy = Enemy::new(EnemyKind::Asteroid, Vec2::new(100.0, 0.0), 2);
        for _ in 0..100 {
            assert!(enemy.update(FRAME_MS, &arena()).is_none());
        }
        assert!(enemy.rotation > 0.0);
    }

    #[test]
    fn test_interceptor_weaves_and_fires_once() {
        let start = Vec2::new(400.0, 100.0);
        let mut enemy = Enemy::new(EnemyKind::Interceptor, start, 1);
        let mut zigzag = 0.0f32;
        let mut drift = 0.0f32;
        let mut fired_at = Vec::new();

        // 15 x 100 ms = 1500 ms, one full interceptor interval
        for step in 1..=15 {
            zigzag += 100.0 * 0.003;
            drift += zigzag.sin() * 2.0 * frames(100.0);
            if enemy.update(100.0, &arena()).is_some() {
                fired_at.push(step);
            }
        }

        assert!(drift.abs() > 1.0);
        assert!((enemy.pos.x - start.x - drift).abs() < 1e-3);
        assert!((enemy.zigzag - 4.5).abs() < 1e-5);
        assert!((enemy.pos.y - (start.y + enemy.speed * 90.0)).abs() < 1e-3);
        assert_eq!(fired_at, vec![15]);
        assert_eq!(enemy.shoot_timer_ms, 0.0);
        assert!(!enemy.dead);
    }

    #[test]
    fn test_power_up_falls_one_pixel_per_frame() {
        let mut power_up = PowerUp::new(PowerUpKind::Ammo, Vec2::new(50.0, 100.0));
        power_up.update(FRAME_MS, &arena());
        assert!((power_up.pos.y - 101.0).abs() < 1e-4);
        assert!((power_up.pulse - FRAME_MS * 0.005).abs() < 1e-6);
        assert!(!power_up.dead);

        for _ in 0..59 {
            power_up.update(FRAME_MS, &arena());
        }
        assert!((power_up.pos.y - 160.0).abs() < 1e-3);
        assert!((power_up.pulse - 60.0 * FRAME_MS * 0.005).abs() < 1e-4);
        assert_eq!(power_up.pos.x, 50.0);
    }

    #[test]
    fn test_power_up_culled_past_bottom_margin() {
        // Landing exactly on the 620 line keeps it, the next frame removes it
        let mut power_up = PowerUp::new(PowerUpKind::Shield, Vec2::new(50.0, ARENA_HEIGHT + 19.0));
        power_up.update(FRAME_MS, &arena());
        assert!(!power_up.dead);
        power_up.update(FRAME_MS, &arena());
        assert!(power_up.dead);

        let mut past = PowerUp::new(PowerUpKind::Shield, Vec2::new(50.0, ARENA_HEIGHT + 19.5));
        past.update(FRAME_MS, &arena());
        assert!(past.dead);
    }

    #[test]
    fn test_enemy_culled_below_arena() {
        let mut enemy = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, ARENA_HEIGHT + 49.0), 1);
        enemy.update(FRAME_MS, &arena());
        assert!(enemy.dead);
    }

    #[test]
    fn test_enemy_bullet_leaves_from_bottom_center() {
        let enemy = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 50.0), 1);
        let bullet = Bullet::enemy(enemy.muzzle());
        assert_eq!(bullet.pos, Vec2::new(113.0, 80.0));
        assert_eq!(bullet.damage, 15.0);
        assert_eq!(bullet.vel, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_player_fire_consumes_ammo_and_resets_cooldown() {
        let mut player = Player::new(Vec2::new(380.0, 500.0));
        let bullet = player.try_fire().expect("fresh player can fire");
        assert_eq!(bullet.owner, BulletOwner::Player);
        assert_eq!(bullet.pos, Vec2::new(398.0, 500.0));
        assert_eq!(player.ammo, 90.0);
        assert!(player.try_fire().is_none(), "cooldown blocks a second shot");
    }

    #[test]
    fn test_player_cannot_fire_without_ammo() {
        let mut player = Player::new(Vec2::new(380.0, 500.0));
        player.ammo = 5.0;
        assert!(player.try_fire().is_none());
        assert_eq!(player.ammo, 5.0);
    }

    #[test]
    fn test_player_movement_clamped_to_arena() {
        let mut player = Player::new(Vec2::new(1.0, 1.0));
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        player.update(FRAME_MS, &input, &arena());
        assert_eq!(player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_ammo_regenerates_to_cap() {
        let mut player = Player::new(Vec2::ZERO);
        player.ammo = 95.0;
        player.update(50.0, &TickInput::default(), &arena());
        assert!((player.ammo - 97.5).abs() < 1e-4);
        player.update(1000.0, &TickInput::default(), &arena());
        assert_eq!(player.ammo, PLAYER_MAX_AMMO);
    }

    #[test]
    fn test_damage_grants_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.take_damage(30.0));
        assert_eq!(player.health, 70.0);
        assert!(!player.take_damage(30.0));
        assert_eq!(player.health, 70.0);

        player.update(HIT_INVULNERABILITY_MS, &TickInput::default(), &arena());
        assert!(!player.invulnerable);
        assert!(player.take_damage(500.0));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_power_up_effects() {
        let mut player = Player::new(Vec2::ZERO);
        player.health = 90.0;
        PowerUpKind::Health.apply(&mut player);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);

        player.ammo = 12.0;
        PowerUpKind::Ammo.apply(&mut player);
        assert_eq!(player.ammo, PLAYER_MAX_AMMO);

        for _ in 0..10 {
            PowerUpKind::Weapon.apply(&mut player);
        }
        assert_eq!(player.fire_rate_ms, MIN_FIRE_RATE_MS);

        PowerUpKind::Shield.apply(&mut player);
        assert!(player.invulnerable);
        assert_eq!(player.invulnerability_ms, SHIELD_DURATION_MS);
    }

    #[test]
    fn test_power_up_kind_is_uniform_pick() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.3, 0.6, 0.9]);
        let kinds: Vec<_> = (0..4)
            .map(|_| PowerUp::random(Vec2::ZERO, &mut rng).kind)
            .collect();
        assert_eq!(kinds, PowerUpKind::ALL.to_vec());
    }

    #[test]
    fn test_bullet_culled_outside_bounds() {
        let bounds = arena().expanded(BULLET_BOUNDS_MARGIN);
        let mut bullet = Bullet::player(Vec2::new(100.0, -10.0));
        bullet.update(FRAME_MS, &bounds);
        assert!(!bullet.dead);
        bullet.update(FRAME_MS, &bounds);
        assert!(bullet.dead);
    }

    #[test]
    fn test_explosion_shards_and_decay() {
        let mut rng = ScriptedRng::new(vec![0.25, 0.75, 0.5]);
        let mut explosion = Explosion::new(Vec2::new(10.0, 10.0), ExplosionKind::Enemy, &mut rng);
        assert_eq!(explosion.shards.len(), 15);
        assert!(
            explosion
                .shards
                .iter()
                .all(|s| palette::EXPLOSION_ENEMY.contains(&s.color))
        );

        let speed_before = explosion.shards[0].vel.length();
        explosion.update(FRAME_MS);
        assert!(explosion.shards[0].vel.length() < speed_before);

        for _ in 0..20 {
            explosion.update(FRAME_MS);
        }
        assert!(explosion.dead);
        assert_eq!(
            Explosion::new(Vec2::ZERO, ExplosionKind::Player, &mut rng).shards.len(),
            25
        );
    }

    #[test]
    fn test_particle_fades_out() {
        let mut rng = ScriptedRng::constant(0.5);
        let mut particle = Particle::new(Vec2::ZERO, palette::SPARK, &mut rng);
        assert_eq!(particle.vel, Vec2::ZERO);
        for _ in 0..49 {
            particle.update(FRAME_MS);
        }
        assert!(!particle.dead);
        particle.update(FRAME_MS);
        particle.update(FRAME_MS);
        assert!(particle.dead);
    }
}

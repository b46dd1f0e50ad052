//! Collision detection and outcome resolution
//!
//! Detection is a strict axis-aligned overlap test. Resolution walks four
//! interaction classes in a fixed order so that several hits on the same
//! entity within one frame always play out the same way:
//! 1. player bullets vs enemies
//! 2. enemy bullets vs player
//! 3. enemies vs player (contact)
//! 4. power-ups vs player
//!
//! Nothing is removed here. Hit entities are flagged `dead` and skipped by
//! every later check in the same frame; the tick compacts afterwards.

use super::entities::{ExplosionKind, Player, PowerUp, palette};
use super::events::SoundEffect;
use super::progression;
use super::rect::Boxed;
use super::rng::SimRng;
use super::state::{GamePhase, GameState};
use crate::consts::{LETHAL_DAMAGE, POWERUP_DROP_CHANCE};

const IMPACT_PARTICLES: usize = 5;
const PLAYER_HIT_PARTICLES: usize = 8;
const CONTACT_PARTICLES: usize = 10;
const PICKUP_PARTICLES: usize = 12;
const RESPAWN_PARTICLES: usize = 15;
const BULLET_SHAKE: f32 = 5.0;
const CONTACT_SHAKE: f32 = 8.0;

/// Whether two boxes overlap. Touching edges do not count.
#[inline]
pub fn collides(a: &impl Boxed, b: &impl Boxed) -> bool {
    a.rect().overlaps(&b.rect())
}

/// Run all interaction classes for one frame
pub fn resolve_collisions(state: &mut GameState, rng: &mut dyn SimRng) {
    player_bullets_vs_enemies(state, rng);
    enemy_bullets_vs_player(state, rng);
    enemies_vs_player(state, rng);
    power_ups_vs_player(state, rng);
}

/// Each live bullet hits at most one enemy: the first live overlap in
/// iteration order. Enemies already destroyed this frame are skipped, so a
/// kill is never credited twice.
fn player_bullets_vs_enemies(state: &mut GameState, rng: &mut dyn SimRng) {
    for bi in 0..state.player_bullets.len() {
        let bullet = &state.player_bullets[bi];
        if bullet.dead {
            continue;
        }
        let Some(ei) = state
            .enemies
            .iter()
            .position(|enemy| !enemy.dead && collides(bullet, enemy))
        else {
            continue;
        };
        let damage = bullet.damage;
        state.player_bullets[bi].dead = true;

        let enemy = &mut state.enemies[ei];
        enemy.take_damage(damage);
        let pos = enemy.pos;
        let points = enemy.points;
        let destroyed = enemy.is_destroyed();
        if destroyed {
            enemy.dead = true;
        }

        state.play(SoundEffect::EnemyHit);
        state.spawn_particles(pos, palette::SPARK, IMPACT_PARTICLES, rng);

        if destroyed {
            state.score += points;
            state.level_score += points;
            state.enemies_killed += 1;
            state.play(SoundEffect::Explosion);
            state.spawn_explosion(pos, ExplosionKind::Enemy, rng);
            if rng.next_f32() < POWERUP_DROP_CHANCE {
                let power_up = PowerUp::random(pos, rng);
                log::debug!("Power-up {:?} dropped at {pos}", power_up.kind);
                state.power_ups.push(power_up);
            }
        }
    }
}

fn enemy_bullets_vs_player(state: &mut GameState, rng: &mut dyn SimRng) {
    for bi in 0..state.enemy_bullets.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = state.player.as_mut() else {
            return;
        };
        let bullet = &mut state.enemy_bullets[bi];
        if bullet.dead || !collides(&*bullet, &*player) {
            continue;
        }
        bullet.dead = true;
        player.take_damage(bullet.damage);
        let pos = player.pos;
        let destroyed = player.is_destroyed();

        state.spawn_particles(pos, palette::PLAYER_HURT, PLAYER_HIT_PARTICLES, rng);
        state.shake(BULLET_SHAKE);
        if destroyed {
            lose_life(state, rng);
        }
    }
}

/// Contact always destroys the enemy, even when the player is shielded.
/// Rammed enemies award no points.
fn enemies_vs_player(state: &mut GameState, rng: &mut dyn SimRng) {
    for ei in 0..state.enemies.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = state.player.as_mut() else {
            return;
        };
        let enemy = &mut state.enemies[ei];
        if enemy.dead || !collides(&*enemy, &*player) {
            continue;
        }
        player.take_damage(enemy.contact_damage);
        enemy.take_damage(LETHAL_DAMAGE);
        enemy.dead = true;
        let enemy_pos = enemy.pos;
        let player_pos = player.pos;
        let destroyed = player.is_destroyed();

        state.spawn_explosion(enemy_pos, ExplosionKind::Enemy, rng);
        state.spawn_particles(player_pos, palette::PLAYER_HURT, CONTACT_PARTICLES, rng);
        state.shake(CONTACT_SHAKE);
        if destroyed {
            lose_life(state, rng);
        }
    }
}

fn power_ups_vs_player(state: &mut GameState, rng: &mut dyn SimRng) {
    for pi in 0..state.power_ups.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = state.player.as_mut() else {
            return;
        };
        let power_up = &mut state.power_ups[pi];
        if power_up.dead || !collides(&*power_up, &*player) {
            continue;
        }
        power_up.kind.apply(player);
        power_up.dead = true;
        let pos = power_up.pos;
        let kind = power_up.kind;

        log::debug!("Picked up {kind:?}");
        state.play(SoundEffect::PowerUp);
        state.spawn_particles(pos, kind.color(), PICKUP_PARTICLES, rng);
    }
}

/// The player ran out of health: spend a life, then respawn or end the run
fn lose_life(state: &mut GameState, rng: &mut dyn SimRng) {
    state.lives = state.lives.saturating_sub(1);
    if let Some(pos) = state.player.as_ref().map(|p| p.pos) {
        state.spawn_explosion(pos, ExplosionKind::Player, rng);
    }

    if state.lives == 0 {
        progression::finish_run(state, false);
        return;
    }

    let spawn = state.player_spawn_point();
    state.player = Some(Player::new(spawn));
    state.spawn_particles(spawn, palette::RESPAWN, RESPAWN_PARTICLES, rng);
    log::info!("Player destroyed, {} lives left", state.lives);
}

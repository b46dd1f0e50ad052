//! Level and run progression
//!
//! Menu -> Playing <-> Paused
//! Playing -> LevelComplete -> Playing (next level)
//! Playing -> GameOver (lives exhausted)
//! LevelComplete -> GameOver (no level after the last one: win)
//! Paused | LevelComplete | GameOver -> Menu
//!
//! Commands issued from the wrong phase are ignored and return `false`.

use super::entities::Player;
use super::events::{GameEvent, LevelSummary, RunSummary, Screen, SoundEffect};
use super::state::{GamePhase, GameState};
use crate::consts::{COMPLETION_BONUS, LEVEL_BONUS_FRACTION};

/// Begin a new run at level 1
pub fn start_game(state: &mut GameState) -> bool {
    if !matches!(state.phase, GamePhase::Menu | GamePhase::GameOver) {
        log::debug!("Ignoring start while {:?}", state.phase);
        return false;
    }
    state.reset_run();
    state.player = Some(Player::new(state.player_spawn_point()));
    state.phase = GamePhase::Playing;
    log::info!("Run started (high score {})", state.high_score);
    announce_level(state);
    true
}

pub fn pause(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        log::debug!("Ignoring pause while {:?}", state.phase);
        return false;
    }
    state.phase = GamePhase::Paused;
    state.emit(GameEvent::ShowScreen(Screen::Pause));
    true
}

pub fn resume(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Paused {
        log::debug!("Ignoring resume while {:?}", state.phase);
        return false;
    }
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::ShowScreen(Screen::Resumed));
    true
}

/// Enter LevelComplete once the kill quota is met. Returns whether it fired.
pub fn check_level_complete(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let Some(quota) = state.level_config().map(|config| config.enemies_to_kill) else {
        return false;
    };
    if state.enemies_killed < quota {
        return false;
    }

    let accuracy = if state.shots_fired > 0 {
        (state.enemies_killed as f64 / state.shots_fired as f64 * 100.0).round() as u32
    } else {
        0
    };
    let bonus = (state.level_score as f64 * LEVEL_BONUS_FRACTION).round() as u64;
    state.score += bonus;

    let summary = LevelSummary {
        level: state.level,
        level_score: state.level_score,
        bonus,
        accuracy,
    };
    state.last_level = Some(summary);
    state.phase = GamePhase::LevelComplete;
    log::info!(
        "Level {} complete: {} pts, bonus {}, accuracy {}%",
        summary.level,
        summary.level_score,
        summary.bonus,
        summary.accuracy
    );
    state.play(SoundEffect::LevelComplete);
    state.emit(GameEvent::ShowScreen(Screen::LevelComplete(summary)));
    true
}

/// Move past a completed level. With no further level in the table the
/// run is won instead.
pub fn next_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelComplete {
        log::debug!("Ignoring next level while {:?}", state.phase);
        return false;
    }
    if state.tuning.level(state.level + 1).is_none() {
        finish_run(state, true);
        return true;
    }

    state.level += 1;
    state.enemies.clear();
    state.enemy_bullets.clear();
    state.particles.clear();
    state.explosions.clear();
    state.level_score = 0;
    state.enemies_killed = 0;
    state.spawner.reset();
    state.phase = GamePhase::Playing;
    announce_level(state);
    true
}

/// End the run, applying the completion bonus on a win and updating the
/// high score
pub fn finish_run(state: &mut GameState, won: bool) {
    if won {
        state.score += COMPLETION_BONUS;
    }
    let new_high_score = state.record_high_score();
    let summary = RunSummary {
        won,
        final_score: state.score,
        level: state.level,
        new_high_score,
    };
    state.outcome = Some(summary);
    state.phase = GamePhase::GameOver;
    if won {
        log::info!("Mission accomplished with {} points", state.score);
    } else {
        log::info!("Mission failed on level {} with {} points", state.level, state.score);
    }
    if new_high_score {
        log::info!("New high score: {}", state.high_score);
    }
    state.emit(GameEvent::ShowScreen(Screen::GameOver(summary)));
}

/// Abandon the current run and show the title screen
pub fn return_to_menu(state: &mut GameState) -> bool {
    if !matches!(
        state.phase,
        GamePhase::Paused | GamePhase::LevelComplete | GamePhase::GameOver
    ) {
        log::debug!("Ignoring menu while {:?}", state.phase);
        return false;
    }
    state.reset_run();
    state.phase = GamePhase::Menu;
    state.emit(GameEvent::ShowScreen(Screen::Menu));
    true
}

fn announce_level(state: &mut GameState) {
    let level = state.level;
    let (name, theme) = state
        .level_config()
        .map(|config| (config.name.clone(), config.theme.clone()))
        .unwrap_or_default();
    log::info!("Level {level}: {name}");
    state.emit(GameEvent::ShowScreen(Screen::LevelStarted { level, name, theme }));
}

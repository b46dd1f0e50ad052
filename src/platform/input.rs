//! Keyboard mapping
//!
//! Arrows or WASD move, Space fires, P toggles pause. Movement and fire are
//! level-triggered (held); pause is edge-triggered and consumed by the next
//! `tick_input` call.

use std::collections::HashSet;

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            " " | "Space" => Some(Key::Fire),
            "p" | "P" => Some(Key::Pause),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
    pause_pending: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        // Auto-repeat must not toggle pause twice
        if key == Key::Pause && !self.held.contains(&Key::Pause) {
            self.pause_pending = true;
        }
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Drop all held keys (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.pause_pending = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot for the next tick. Consumes a pending pause toggle.
    pub fn tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            fire: self.is_held(Key::Fire),
            pause: std::mem::take(&mut self.pause_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("d"), Some(Key::Right));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("Escape"), None);
    }

    #[test]
    fn test_held_keys_persist_across_ticks() {
        let mut keys = KeyboardState::new();
        keys.press(Key::Left);
        keys.press(Key::Fire);
        assert!(keys.tick_input().left);
        let input = keys.tick_input();
        assert!(input.left && input.fire);
        keys.release(Key::Left);
        assert!(!keys.tick_input().left);
    }

    #[test]
    fn test_pause_is_one_shot() {
        let mut keys = KeyboardState::new();
        keys.press(Key::Pause);
        keys.press(Key::Pause);
        assert!(keys.tick_input().pause);
        assert!(!keys.tick_input().pause);

        keys.release(Key::Pause);
        keys.press(Key::Pause);
        assert!(keys.tick_input().pause);
    }

    #[test]
    fn test_opposite_directions_both_reported() {
        let mut keys = KeyboardState::new();
        keys.press(Key::Left);
        keys.press(Key::Right);
        let input = keys.tick_input();
        assert!(input.left && input.right);
    }
}

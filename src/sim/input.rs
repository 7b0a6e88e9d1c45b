//! Keyboard state tracking
//!
//! Physical key codes (the DOM `KeyboardEvent.code` strings) map onto four
//! logical directions. Each direction has two bindings: WASD and arrows.

use serde::{Deserialize, Serialize};

/// Logical movement keys consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

impl Direction {
    /// Map a physical key code to a direction. Unknown codes map to `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Direction::Forward),
            "KeyS" | "ArrowDown" => Some(Direction::Backward),
            "KeyA" | "ArrowLeft" => Some(Direction::TurnLeft),
            "KeyD" | "ArrowRight" => Some(Direction::TurnRight),
            _ => None,
        }
    }

    /// Whether this code is the arrow-key binding (as opposed to WASD)
    fn is_arrow(code: &str) -> bool {
        code.starts_with("Arrow")
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed state of both bindings for every direction.
///
/// A direction reads as pressed while either of its keys is held, so letting
/// go of `W` while `ArrowUp` is still down keeps the kitty walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// [direction][0 = letter key, 1 = arrow key]
    held: [[bool; 2]; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event. Returns whether the key was recognised.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set(code, true)
    }

    /// Record a key-up event. Returns whether the key was recognised.
    pub fn key_up(&mut self, code: &str) -> bool {
        self.set(code, false)
    }

    fn set(&mut self, code: &str, pressed: bool) -> bool {
        let Some(dir) = Direction::from_code(code) else {
            return false;
        };
        let slot = usize::from(Direction::is_arrow(code));
        self.held[dir.index()][slot] = pressed;
        true
    }

    /// Directly set a logical direction (both bindings)
    pub fn set_direction(&mut self, dir: Direction, pressed: bool) {
        self.held[dir.index()] = [pressed, false];
    }

    pub fn is_pressed(&self, dir: Direction) -> bool {
        let [letter, arrow] = self.held[dir.index()];
        letter || arrow
    }

    pub fn forward(&self) -> bool {
        self.is_pressed(Direction::Forward)
    }

    pub fn backward(&self) -> bool {
        self.is_pressed(Direction::Backward)
    }

    pub fn turn_left(&self) -> bool {
        self.is_pressed(Direction::TurnLeft)
    }

    pub fn turn_right(&self) -> bool {
        self.is_pressed(Direction::TurnRight)
    }

    /// Release everything (window blur drops key-up events)
    pub fn clear(&mut self) {
        self.held = [[false; 2]; 4];
    }

    /// Convenience for tests and scripted drivers
    pub fn with(dirs: &[Direction]) -> Self {
        let mut input = Self::new();
        for &dir in dirs {
            input.set_direction(dir, true);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_bindings_map() {
        let mut input = InputState::new();
        assert!(input.key_down("KeyW"));
        assert!(input.forward());
        input.key_up("KeyW");
        assert!(!input.forward());

        input.key_down("ArrowRight");
        assert!(input.turn_right());
        assert!(!input.turn_left());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("Space"));
        assert!(!input.key_down("KeyQ"));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_overlapping_bindings() {
        let mut input = InputState::new();
        input.key_down("KeyW");
        input.key_down("ArrowUp");
        input.key_up("KeyW");
        assert!(input.forward(), "arrow key still held");
        input.key_up("ArrowUp");
        assert!(!input.forward());
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::with(&[Direction::Forward, Direction::TurnLeft]);
        assert!(input.forward() && input.turn_left());
        input.clear();
        assert_eq!(input, InputState::default());
    }
}

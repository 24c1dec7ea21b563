//! Keyboard bindings and the first-gesture gate.
//!
//! Centralizes all keyboard shortcuts and key mapping logic.

use nannou::prelude::*;

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlayback,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

/// Parse a key into an action
pub fn action_for_key(key: Key) -> Option<Action> {
    match key {
        Key::Q | Key::Escape => Some(Action::Quit),
        Key::Space => Some(Action::TogglePlayback),
        Key::M => Some(Action::ToggleMute),
        Key::Up => Some(Action::VolumeUp),
        Key::Down => Some(Action::VolumeDown),
        Key::J => Some(Action::ScrollDown),
        Key::K => Some(Action::ScrollUp),
        Key::PageDown => Some(Action::PageDown),
        Key::PageUp => Some(Action::PageUp),
        _ => None,
    }
}

/// One-shot gesture gate.
///
/// Any of the qualifying input kinds (key press, mouse press, touch) counts
/// as the unlocking gesture; the gate fires for exactly the first one and
/// never re-arms, even if the unlock it triggered could not start playback.
pub struct GestureGate {
    armed: bool,
}

impl GestureGate {
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns true exactly once.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

impl Default for GestureGate {
    fn default() -> Self {
        Self::new()
    }
}

//! Keyboard state: held movement keys plus a queue of one-shot actions.
//!
//! Held keys are tracked by the frame in which their last press/repeat event
//! arrived.  Terminals that report key releases drop the key immediately;
//! classic terminals only send repeated presses, so a key also expires after
//! `HOLD_WINDOW` frames of silence.
use std::collections::{HashMap, VecDeque};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Frames a key stays "held" after its last press/repeat event
/// (8 frames @ 60 FPS ≈ 133 ms, shorter than any OS repeat interval).
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Shoot,
    Start,
    TogglePause,
    Reset,
    Quit,
}

/// Movement keys live this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Default)]
pub struct InputState {
    key_frame: HashMap<KeyCode, u64>,
    actions: VecDeque<Action>,
    frame: u64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the frame counter; call once per frame before draining events.
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, self.frame);
                if let Some(action) = action_for(&key) {
                    self.actions.push_back(action);
                }
            }
            // Auto-repeat keeps the key held, and keeps firing like a keydown.
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, self.frame);
                if key.code == KeyCode::Char(' ') {
                    self.actions.push_back(Action::Shoot);
                }
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
            }
        }
    }

    pub fn movement(&self) -> Movement {
        Movement {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    /// Hand out queued actions in arrival order.
    pub fn drain_actions(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.actions.drain(..)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_held(key))
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

fn action_for(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Shoot),
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

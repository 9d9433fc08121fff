use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::GameState;
use crate::game::Control;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Press(Control),
    Release(Control),
    Pause,
    Resume,
    Quit,
}

/// Translates raw key events into game actions.
///
/// Movement is edge-triggered: a press sets a direction and its release clears
/// it. Terminals without keyboard enhancement never report releases, so in that
/// mode pressing one direction releases the other and Space releases both.
pub struct InputManager {
    reports_releases: bool,
    actions: Vec<InputAction>,
}

impl InputManager {
    /// Creates a new InputManager; `reports_releases` is whether the terminal
    /// delivers key release events
    pub fn new(reports_releases: bool) -> Self {
        Self {
            reports_releases,
            actions: Vec::new(),
        }
    }

    /// Polls for all pending input events without blocking
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    /// Processes a key event, queueing the actions it maps to
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, game_state);
            }
            KeyEventKind::Release => {
                if let Some(control) = control_for(key_event.code) {
                    self.actions.push(InputAction::Release(control));
                }
            }
            _ => {}
        }
    }

    /// Handles key press events
    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
            self.actions.push(match game_state {
                GameState::Playing => InputAction::Pause,
                GameState::Paused => InputAction::Resume,
            });
            return;
        }

        if let Some(control) = control_for(key_event.code) {
            if !self.reports_releases {
                self.actions.push(InputAction::Release(opposite(control)));
            }
            self.actions.push(InputAction::Press(control));
        } else if key_event.code == KeyCode::Char(' ') && !self.reports_releases {
            self.actions.push(InputAction::Release(Control::Up));
            self.actions.push(InputAction::Release(Control::Down));
        }
    }

    /// Returns the actions queued since the last call, oldest first
    pub fn drain_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }
}

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Control::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Control::Down),
        _ => None,
    }
}

fn opposite(control: Control) -> Control {
    match control {
        Control::Up => Control::Down,
        Control::Down => Control::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_press_and_release_map_to_controls() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('w')), &GameState::Playing);
        input.handle_key_event(release(KeyCode::Char('w')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Down), &GameState::Playing);

        assert_eq!(
            input.drain_actions(),
            vec![
                InputAction::Press(Control::Up),
                InputAction::Release(Control::Up),
                InputAction::Press(Control::Down),
            ]
        );
        assert!(input.drain_actions().is_empty());
    }

    #[test]
    fn test_both_directions_can_be_held() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('W')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('S')), &GameState::Playing);

        assert_eq!(
            input.drain_actions(),
            vec![
                InputAction::Press(Control::Up),
                InputAction::Press(Control::Down),
            ]
        );
    }

    #[test]
    fn test_legacy_terminal_press_releases_opposite() {
        let mut input = InputManager::new(false);
        input.handle_key_event(press(KeyCode::Up), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char(' ')), &GameState::Playing);

        assert_eq!(
            input.drain_actions(),
            vec![
                InputAction::Release(Control::Down),
                InputAction::Press(Control::Up),
                InputAction::Release(Control::Up),
                InputAction::Release(Control::Down),
            ]
        );
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('x')), &GameState::Playing);
        input.handle_key_event(release(KeyCode::F(5)), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char(' ')), &GameState::Playing);
        assert!(input.drain_actions().is_empty());
    }

    #[test]
    fn test_pause_toggles_with_state() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('p')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Char('P')), &GameState::Paused);
        assert_eq!(
            input.drain_actions(),
            vec![InputAction::Pause, InputAction::Resume]
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Esc), &GameState::Playing);
        input.handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &GameState::Paused,
        );
        input.handle_key_event(press(KeyCode::Char('q')), &GameState::Playing);
        assert_eq!(input.drain_actions(), vec![InputAction::Quit; 3]);
    }

    #[test]
    fn test_repeat_events_are_ignored() {
        let mut input = InputManager::new(true);
        input.handle_key_event(
            KeyEvent::new_with_kind(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Repeat),
            &GameState::Playing,
        );
        assert!(input.drain_actions().is_empty());
    }
}

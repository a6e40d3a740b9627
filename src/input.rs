//! Keyboard handling for the game loop.
//!
//! Turns raw crossterm events into the `TickInput` the simulation consumes.

use std::collections::HashMap;

use bomb_dodge::entities::{HeldKeys, TickInput};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the first auto-repeat only arrives after the OS repeat delay (up to
/// ~600 ms), so the window spans 30 frames (600 ms at 50 ticks/s).  On such
/// terminals the bird keeps moving for up to that long after release.
pub const HOLD_WINDOW: u64 = 30;

const UP: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

/// Tracks the frame each key was last seen (press or repeat).
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the tracker and into this tick's one-shot
    /// actions.  Space fires and the quit keys act on `Press` only.
    pub fn handle(&mut self, event: &Event, frame: u64, input: &mut TickInput) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = *event
        else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true
                    }
                    KeyCode::Char(' ') => input.fire = true,
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }

    /// Direction keys still live at `frame`.
    pub fn held(&self, frame: u64) -> HeldKeys {
        HeldKeys {
            up: self.any_held(&UP, frame),
            down: self.any_held(&DOWN, frame),
            left: self.any_held(&LEFT, frame),
            right: self.any_held(&RIGHT, frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyEventKind::Press)
    }

    fn feed(tracker: &mut KeyTracker, events: &[Event], frame: u64) -> TickInput {
        let mut input = TickInput::default();
        for ev in events {
            tracker.handle(ev, frame, &mut input);
        }
        input.held = tracker.held(frame);
        input
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let mut tracker = KeyTracker::new();
        let input = feed(&mut tracker, &[press(KeyCode::Up), press(KeyCode::Char('d'))], 1);
        assert_eq!(
            input.held,
            HeldKeys {
                up: true,
                right: true,
                ..HeldKeys::default()
            }
        );

        let mut tracker = KeyTracker::new();
        let input = feed(
            &mut tracker,
            &[press(KeyCode::Char('S')), press(KeyCode::Left)],
            1,
        );
        assert!(input.held.down && input.held.left);
        assert!(!input.held.up && !input.held.right);
    }

    #[test]
    fn held_key_survives_repeat_delay_then_expires() {
        let mut tracker = KeyTracker::new();
        feed(&mut tracker, &[press(KeyCode::Right)], 10);
        assert!(tracker.held(10 + HOLD_WINDOW).right);
        assert!(!tracker.held(11 + HOLD_WINDOW).right);
    }

    #[test]
    fn repeat_refreshes_and_release_clears() {
        let mut tracker = KeyTracker::new();
        feed(&mut tracker, &[press(KeyCode::Up)], 1);
        feed(&mut tracker, &[key(KeyCode::Up, KeyEventKind::Repeat)], 25);
        assert!(tracker.held(25 + HOLD_WINDOW).up);
        let input = feed(&mut tracker, &[key(KeyCode::Up, KeyEventKind::Release)], 26);
        assert!(!input.held.up);
    }

    #[test]
    fn space_fires_on_press_only() {
        let mut tracker = KeyTracker::new();
        assert!(feed(&mut tracker, &[press(KeyCode::Char(' '))], 1).fire);
        let repeat = key(KeyCode::Char(' '), KeyEventKind::Repeat);
        assert!(!feed(&mut tracker, &[repeat], 2).fire);
        let release = key(KeyCode::Char(' '), KeyEventKind::Release);
        assert!(!feed(&mut tracker, &[release], 3).fire);
        // Holding space never counts as a direction
        assert_eq!(tracker.held(3), HeldKeys::default());
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut tracker = KeyTracker::new();
            assert!(feed(&mut tracker, &[press(code)], 1).quit);
        }

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let mut tracker = KeyTracker::new();
        assert!(feed(&mut tracker, &[ctrl_c], 1).quit);

        // Plain 'c' is not a quit
        let mut tracker = KeyTracker::new();
        assert!(!feed(&mut tracker, &[press(KeyCode::Char('c'))], 1).quit);
    }

    #[test]
    fn non_key_events_are_ignored() {
        let mut tracker = KeyTracker::new();
        let input = feed(&mut tracker, &[Event::Resize(80, 24), Event::FocusLost], 1);
        assert_eq!(input, TickInput::default());
    }
}

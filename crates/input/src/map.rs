//! Key mapping from terminal events to game events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_pairs_types::SlotId;

/// Step applied to the simulated tilt per arrow-key press.
pub const TILT_STEP: f32 = 0.25;

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Tap completed on a slot.
    Tap(SlotId),
    /// Nudge the simulated accelerometer (device frame).
    TiltNudge { dx: f32, dy: f32 },
    /// Re-deal the round.
    Restart,
}

/// Map keyboard input to game events.
///
/// Digits `1`-`9` and `0` select slots 0-9; `a` `s` `d` `f` `g` `h` select
/// slots 10-15. Arrows tilt the table (the device frame is remapped for the
/// upright orientation, so Down pulls cards toward the bottom of the screen).
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => Some(InputEvent::Tap(c as usize - '1' as usize)),
        KeyCode::Char('0') => Some(InputEvent::Tap(9)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(InputEvent::Tap(10)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::Tap(11)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(InputEvent::Tap(12)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(InputEvent::Tap(13)),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(InputEvent::Tap(14)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(InputEvent::Tap(15)),

        KeyCode::Left => Some(InputEvent::TiltNudge {
            dx: -TILT_STEP,
            dy: 0.0,
        }),
        KeyCode::Right => Some(InputEvent::TiltNudge {
            dx: TILT_STEP,
            dy: 0.0,
        }),
        // Upright remap is (x, -y): a negative device y pulls down-screen.
        KeyCode::Up => Some(InputEvent::TiltNudge {
            dx: 0.0,
            dy: TILT_STEP,
        }),
        KeyCode::Down => Some(InputEvent::TiltNudge {
            dx: 0.0,
            dy: -TILT_STEP,
        }),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_digit_keys_select_slots() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(InputEvent::Tap(0))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('9'))),
            Some(InputEvent::Tap(8))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('0'))),
            Some(InputEvent::Tap(9))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(InputEvent::Tap(15))
        );
    }

    #[test]
    fn test_arrows_nudge_tilt() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(InputEvent::TiltNudge {
                dx: 0.0,
                dy: -TILT_STEP
            })
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(InputEvent::TiltNudge {
                dx: TILT_STEP,
                dy: 0.0
            })
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('1'))));
    }

    #[test]
    fn test_unmapped_key_is_none() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }
}

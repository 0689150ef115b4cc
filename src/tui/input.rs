//! Key handling

use super::state::ChatState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved per page key
pub const PAGE: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Start a run with this query
    Submit(String),
    Quit,
}

/// Apply a key press to the state and report what the loop should do
pub fn handle_key(state: &mut ChatState, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if ctrl => InputAction::Quit,
        KeyCode::Enter => state.submit().map_or(InputAction::None, InputAction::Submit),
        KeyCode::Backspace => {
            state.pop_char();
            InputAction::None
        }
        KeyCode::PageUp => {
            state.scroll_up(PAGE);
            InputAction::None
        }
        KeyCode::PageDown => {
            state.scroll_down(PAGE);
            InputAction::None
        }
        KeyCode::Char(c) if !ctrl => {
            state.push_char(c);
            InputAction::None
        }
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut ChatState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(state, press(KeyCode::Char(c))), InputAction::None);
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut state = ChatState::new();
        type_text(&mut state, "rusty");
        handle_key(&mut state, press(KeyCode::Backspace));

        assert_eq!(
            handle_key(&mut state, press(KeyCode::Enter)),
            InputAction::Submit("rust".into())
        );
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_enter_ignored_while_running() {
        let mut state = ChatState::new();
        type_text(&mut state, "first");
        handle_key(&mut state, press(KeyCode::Enter));

        type_text(&mut state, "second");
        assert_eq!(handle_key(&mut state, press(KeyCode::Enter)), InputAction::None);
        assert_eq!(state.input, "second");
    }

    #[test]
    fn test_quit_keys() {
        let mut state = ChatState::new();
        assert_eq!(handle_key(&mut state, press(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            InputAction::Quit
        );
        // Plain 'q' is text
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), InputAction::None);
        assert_eq!(state.input, "q");
    }

    #[test]
    fn test_page_keys_scroll() {
        let mut state = ChatState::new();
        state.max_scroll = 30;

        handle_key(&mut state, press(KeyCode::PageUp));
        assert_eq!(state.scroll, Some(20));
        handle_key(&mut state, press(KeyCode::PageDown));
        assert_eq!(state.scroll, None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut state = ChatState::new();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut state, key);
        assert!(state.input.is_empty());
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Slide the deck to the following post
    NextPost,
    /// Slide the deck to the preceding post
    PrevPost,
    MoveDown,
    MoveUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    Select,
    Home,
    HistoryBack,
    HistoryForward,
    /// Header menu entry (0-based)
    Menu(usize),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Normalize: crossterm reports uppercase letters with or without SHIFT
    let modifiers = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    // Number keys pick a header menu entry
    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::Menu(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_core::AppConfig;
    use std::sync::Arc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_bound_keys() {
        let app = App::new(Arc::new(AppConfig::default()));
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('l'), KeyModifiers::NONE), &app, &keymap),
            Action::NextPost
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &app, &keymap),
            Action::ScrollHalfPageDown
        );
        // Some terminals drop SHIFT on uppercase letters
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::NONE), &app, &keymap),
            Action::JumpToBottom
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = App::new(Arc::new(AppConfig::default()));
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_menu_numbers() {
        let app = App::new(Arc::new(AppConfig::default()));
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1'), KeyModifiers::NONE), &app, &keymap),
            Action::Menu(0)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('5'), KeyModifiers::NONE), &app, &keymap),
            Action::Menu(4)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }
}

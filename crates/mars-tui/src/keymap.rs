use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use mars_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action completed by a "gg" double press, if configured
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        let mut add_binding = |key_str: &str, action: Action| {
            if key_str == "gg" {
                pending_g_action = Some(action);
                return;
            }

            match parse_key_binding(key_str) {
                Some(binding) => {
                    if let Some(existing) = bindings.get(&binding) {
                        warn!(
                            "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                            key_str, existing, action
                        );
                    } else {
                        bindings.insert(binding, action);
                    }
                }
                None => warn!("Invalid key binding: '{}', ignoring", key_str),
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.next_post, Action::NextPost);
        add_binding(&config.prev_post, Action::PrevPost);
        add_binding(&config.move_down, Action::MoveDown);
        add_binding(&config.move_up, Action::MoveUp);
        add_binding(&config.scroll_half_down, Action::ScrollHalfPageDown);
        add_binding(&config.scroll_half_up, Action::ScrollHalfPageUp);
        add_binding(&config.scroll_page_down, Action::ScrollPageDown);
        add_binding(&config.scroll_page_up, Action::ScrollPageUp);
        add_binding(&config.jump_to_top, Action::JumpToTop);
        add_binding(&config.jump_to_bottom, Action::JumpToBottom);
        add_binding(&config.select, Action::Select);
        add_binding(&config.home, Action::Home);
        add_binding(&config.history_back, Action::HistoryBack);
        add_binding(&config.history_forward, Action::HistoryForward);

        // Always available, whatever the config says
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Left)).or_insert(Action::PrevPost);
        bindings.entry(KeyBinding::simple(KeyCode::Right)).or_insert(Action::NextPost);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::MoveUp);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::MoveDown);
        bindings.entry(KeyBinding::simple(KeyCode::PageDown)).or_insert(Action::ScrollPageDown);
        bindings.entry(KeyBinding::simple(KeyCode::PageUp)).or_insert(Action::ScrollPageUp);

        Self {
            bindings,
            pending_g_action,
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Check if a single 'g' press should start a pending sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "j", "k", "h", "l", "q", etc.
/// - Uppercase (Shift): "G", "H", etc.
/// - Ctrl: "<C-d>", "<C-r>", etc.
/// - Shift: "<S-Tab>", etc.
/// - Special keys: "<CR>", "<Esc>", "<Tab>", "<Space>", "<BS>", "<Left>", ...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        return parse_special_key(&s[1..s.len() - 1]);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after a modifier (e.g., "d" in "<C-d>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some(KeyCode::Char(c.to_ascii_lowercase()))
        }
    }
}

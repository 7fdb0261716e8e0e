//! Key bindings and the key-map trait used to render help lines.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One or more key combinations bound to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Short label for the key, shown in help (e.g. `"↑/k"`).
    pub label: String,
    /// What the binding does, shown in help.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// A key code plus the modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Bind a single combination.
    pub fn new(key: KeyCombination, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], label, description)
    }

    /// Bind several combinations to one action.
    pub fn with_keys(
        keys: Vec<KeyCombination>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            label: label.into(),
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Modifiers must match exactly, so `Ctrl+U` does not fire a plain `u`
    /// binding and vice versa. Shift is ignored for character keys because
    /// terminals disagree on whether to report it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys.iter().any(|k| {
            let mut modifiers = event.modifiers;
            if matches!(k.code, KeyCode::Char(_)) {
                modifiers.remove(KeyModifiers::SHIFT);
            }
            k.code == event.code && modifiers == k.modifiers
        })
    }

    /// Enable or disable the binding.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// Types that expose their bindings for a help line.
pub trait KeyMap {
    /// The bindings worth showing in a one-line hint.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Render bindings as `label description · label description`.
pub fn help_line(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .filter(|b| b.enabled)
        .map(|b| format!("{} {}", b.label, b.description))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn plain_binding_ignores_ctrl_variant() {
        let home = Binding::new(KeyCombination::new(KeyCode::Home), "home", "top");
        assert!(home.matches(&event(KeyCode::Home, KeyModifiers::NONE)));
        assert!(!home.matches(&event(KeyCode::Home, KeyModifiers::CONTROL)));
    }

    #[test]
    fn ctrl_binding_needs_ctrl() {
        let clear = Binding::new(KeyCombination::ctrl(KeyCode::Char('u')), "^u", "clear");
        assert!(clear.matches(&event(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(!clear.matches(&event(KeyCode::Char('u'), KeyModifiers::NONE)));
    }

    #[test]
    fn shift_is_ignored_for_chars() {
        let bottom = Binding::new(KeyCombination::new(KeyCode::Char('G')), "G", "bottom");
        assert!(bottom.matches(&event(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn disabled_never_matches_and_is_hidden() {
        let up = Binding::new(KeyCombination::new(KeyCode::Up), "↑", "up").enabled(false);
        let down = Binding::new(KeyCombination::new(KeyCode::Down), "↓", "down");
        assert!(!up.matches(&event(KeyCode::Up, KeyModifiers::NONE)));
        assert_eq!(help_line(&[&up, &down]), "↓ down");
    }

    #[test]
    fn help_line_joins() {
        let a = Binding::new(KeyCombination::new(KeyCode::PageUp), "pgup", "page up");
        let b = Binding::new(KeyCombination::new(KeyCode::Esc), "esc", "quit");
        assert_eq!(help_line(&[&a, &b]), "pgup page up · esc quit");
    }
}

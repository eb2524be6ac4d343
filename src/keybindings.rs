use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The desktop's stock bindings. Alt+F4 closes like on the web desktop;
    /// everything else sits on Ctrl or Alt so plain keys reach the windows.
    pub fn desktop() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::F(1), KeyModifiers::NONE));
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::Char('?'), KeyModifiers::NONE));
        kb.add(ToggleHelp, KeyCombo::new(KeyCode::Char('?'), KeyModifiers::SHIFT));
        kb.add(NewWindow, KeyCombo::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        kb.add(CloseFocused, KeyCombo::new(KeyCode::F(4), KeyModifiers::ALT));
        kb.add(CloseFocused, KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        kb.add(MinimizeFocused, KeyCombo::new(KeyCode::Down, KeyModifiers::ALT));
        kb.add(ToggleMaximize, KeyCombo::new(KeyCode::Up, KeyModifiers::ALT));
        kb.add(SnapLeft, KeyCombo::new(KeyCode::Left, KeyModifiers::ALT));
        kb.add(SnapRight, KeyCombo::new(KeyCode::Right, KeyModifiers::ALT));
        kb.add(RestoreFocused, KeyCombo::new(KeyCode::Char('r'), KeyModifiers::ALT));
        kb.add(CycleNextWindow, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(CyclePrevWindow, KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE));
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| self.matches(*action, key))
    }

    /// Bound actions with their key labels, in help display order.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        Action::ALL
            .into_iter()
            .filter_map(|action| {
                let combos = self.combos_for(action);
                (!combos.is_empty()).then_some((action, combos))
            })
            .collect()
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_f4_closes_focused() {
        let kb = KeyBindings::desktop();
        let ev = KeyEvent::new(KeyCode::F(4), KeyModifiers::ALT);
        assert_eq!(kb.action_for_key(&ev), Some(Action::CloseFocused));
        let plain = KeyEvent::new(KeyCode::F(4), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&plain), None);
    }

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::desktop();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        assert!(!kb.matches(Action::Quit, &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn help_entries_follow_display_order() {
        let kb = KeyBindings::desktop();
        let entries = kb.help_entries();
        assert_eq!(entries.first().map(|(a, _)| *a), Some(Action::NewWindow));
        assert_eq!(entries.last().map(|(a, _)| *a), Some(Action::Quit));
        let close = entries
            .iter()
            .find(|(a, _)| *a == Action::CloseFocused)
            .unwrap();
        assert_eq!(close.1, vec!["Alt+F4".to_string(), "Ctrl+W".to_string()]);
    }

    #[test]
    fn empty_bindings_match_nothing() {
        let kb = KeyBindings::new();
        let ev = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), None);
        assert!(kb.help_entries().is_empty());
    }
}

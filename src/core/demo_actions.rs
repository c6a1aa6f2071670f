//! Action vocabulary for the demo dashboard.
//!
//! Translates raw `KeyEvent`s into semantic `DemoAction`s through the keybind
//! table in the config, so the dashboard core never sees crossterm keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Everything the dashboard can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    Randomize, // new random targets + config showcase
    Showcase,  // long 0 -> 100 run on the showcase bar
    PauseAll,
    ResumeAll,
    ResetAll,
    Quit,

    // Key not bound
    None,
}

/// Convert a key event to the keybind string format ("r", "Ctrl+c", "Esc")
pub fn key_event_to_string(key: KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match key.code {
        // Shift is already folded into the character
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

fn default_randomize() -> Vec<String> {
    vec!["r".to_string()]
}

fn default_showcase() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_pause() -> Vec<String> {
    vec!["p".to_string()]
}

fn default_resume() -> Vec<String> {
    vec!["c".to_string()]
}

fn default_reset() -> Vec<String> {
    vec!["x".to_string()]
}

fn default_quit() -> Vec<String> {
    vec!["q".to_string(), "Esc".to_string(), "Ctrl+c".to_string()]
}

/// Keys bound to each action; several keys may share one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoKeybinds {
    #[serde(default = "default_randomize")]
    pub randomize: Vec<String>,
    #[serde(default = "default_showcase")]
    pub showcase: Vec<String>,
    #[serde(default = "default_pause")]
    pub pause: Vec<String>,
    #[serde(default = "default_resume")]
    pub resume: Vec<String>,
    #[serde(default = "default_reset")]
    pub reset: Vec<String>,
    #[serde(default = "default_quit")]
    pub quit: Vec<String>,
}

impl Default for DemoKeybinds {
    fn default() -> Self {
        Self {
            randomize: default_randomize(),
            showcase: default_showcase(),
            pause: default_pause(),
            resume: default_resume(),
            reset: default_reset(),
            quit: default_quit(),
        }
    }
}

impl DemoKeybinds {
    pub fn resolve(&self, key: KeyEvent) -> DemoAction {
        let pressed = key_event_to_string(key);
        if pressed.is_empty() {
            return DemoAction::None;
        }

        let table = [
            (&self.randomize, DemoAction::Randomize),
            (&self.showcase, DemoAction::Showcase),
            (&self.pause, DemoAction::PauseAll),
            (&self.resume, DemoAction::ResumeAll),
            (&self.reset, DemoAction::ResetAll),
            (&self.quit, DemoAction::Quit),
        ];
        table
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| *k == pressed))
            .map(|(_, action)| *action)
            .unwrap_or(DemoAction::None)
    }

    /// Keys bound to more than one action.
    pub fn conflicts(&self) -> Vec<String> {
        let all = [
            &self.randomize,
            &self.showcase,
            &self.pause,
            &self.resume,
            &self.reset,
            &self.quit,
        ];
        let mut seen = std::collections::HashSet::new();
        let mut conflicts = Vec::new();
        for key in all.iter().flat_map(|keys| keys.iter()) {
            if !seen.insert(key.as_str()) && !conflicts.contains(key) {
                conflicts.push(key.clone());
            }
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_to_string() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_string(key), "Ctrl+c");

        let key = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_string(key), "R");

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(key_event_to_string(key), "Esc");

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(key_event_to_string(key), "");
    }

    #[test]
    fn test_default_bindings() {
        let binds = DemoKeybinds::default();
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(binds.resolve(press('r')), DemoAction::Randomize);
        assert_eq!(binds.resolve(press('t')), DemoAction::Showcase);
        assert_eq!(binds.resolve(press('p')), DemoAction::PauseAll);
        assert_eq!(binds.resolve(press('c')), DemoAction::ResumeAll);
        assert_eq!(binds.resolve(press('x')), DemoAction::ResetAll);
        assert_eq!(binds.resolve(press('q')), DemoAction::Quit);
        assert_eq!(binds.resolve(press('z')), DemoAction::None);
        assert_eq!(
            binds.resolve(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            DemoAction::Quit
        );
        assert_eq!(binds.resolve(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)), DemoAction::None);
    }

    #[test]
    fn test_conflicts() {
        assert!(DemoKeybinds::default().conflicts().is_empty());

        let binds = DemoKeybinds {
            pause: vec!["r".to_string()],
            ..DemoKeybinds::default()
        };
        assert_eq!(binds.conflicts(), vec!["r".to_string()]);
    }
}

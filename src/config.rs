// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - A tabbed scratch pad TUI

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Keybindings configuration (string form, e.g. "ctrl-q", "enter").
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub quit: String,
    pub new_note: String,
    pub close_note: String,
    pub next_note: String,
    pub prev_note: String,
    pub rename: String,
    pub underline: String,
    pub link: String,
    pub rule: String,
    pub open_link: String,
    pub escape: String,
    pub enter: String,
    pub backspace: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            quit: "ctrl-q".to_string(),
            new_note: "ctrl-n".to_string(),
            close_note: "ctrl-w".to_string(),
            next_note: "ctrl-pagedown".to_string(),
            prev_note: "ctrl-pageup".to_string(),
            rename: "ctrl-r".to_string(),
            underline: "ctrl-u".to_string(),
            link: "ctrl-k".to_string(),
            rule: "ctrl-shift-l".to_string(),
            open_link: "ctrl-o".to_string(),
            escape: "esc".to_string(),
            enter: "enter".to_string(),
            backspace: "backspace".to_string(),
        }
    }
}

/// Application configuration loaded from config.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiescence window in milliseconds before an edit burst is persisted.
    pub save_delay_ms: u64,
    /// Width of the tab-equivalent run of spaces (1-16).
    pub tab_width: u8,
    #[serde(default)]
    pub keys: KeysConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_delay_ms: 300,
            tab_width: 5,
            keys: KeysConfig::default(),
        }
    }
}

/// Parses a key string (e.g. "ctrl-q", "enter", "pagedown") into a KeyEvent.
pub fn parse_key_event(s: &str) -> Option<KeyEvent> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    let parts: Vec<&str> = s.split('-').collect();
    let (modifiers, key_part) = if parts.len() >= 2 {
        let mut mods = KeyModifiers::empty();
        for p in parts.iter().take(parts.len() - 1) {
            match *p {
                "ctrl" => mods.insert(KeyModifiers::CONTROL),
                "alt" => mods.insert(KeyModifiers::ALT),
                "shift" => mods.insert(KeyModifiers::SHIFT),
                _ => {}
            }
        }
        (mods, parts[parts.len() - 1])
    } else {
        (KeyModifiers::empty(), parts[0])
    };

    let code = match key_part {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ if key_part.len() == 1 => {
            let c = key_part.chars().next().unwrap();
            KeyCode::Char(c)
        }
        _ => return None,
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Resolved keybindings (parsed KeyEvents for fast comparison).
#[derive(Debug, Clone)]
pub struct ResolvedKeys {
    pub quit: KeyEvent,
    pub new_note: KeyEvent,
    pub close_note: KeyEvent,
    pub next_note: KeyEvent,
    pub prev_note: KeyEvent,
    pub rename: KeyEvent,
    pub underline: KeyEvent,
    pub link: KeyEvent,
    pub rule: KeyEvent,
    pub open_link: KeyEvent,
    pub escape: KeyEvent,
    pub enter: KeyEvent,
    pub backspace: KeyEvent,
}

impl ResolvedKeys {
    pub fn from_config(keys: &KeysConfig) -> Self {
        fn parse_or(s: &str, default: KeyEvent) -> KeyEvent {
            parse_key_event(s).unwrap_or(default)
        }
        let ctrl = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        Self {
            quit: parse_or(&keys.quit, ctrl('q')),
            new_note: parse_or(&keys.new_note, ctrl('n')),
            close_note: parse_or(&keys.close_note, ctrl('w')),
            next_note: parse_or(
                &keys.next_note,
                KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL),
            ),
            prev_note: parse_or(
                &keys.prev_note,
                KeyEvent::new(KeyCode::PageUp, KeyModifiers::CONTROL),
            ),
            rename: parse_or(&keys.rename, ctrl('r')),
            underline: parse_or(&keys.underline, ctrl('u')),
            link: parse_or(&keys.link, ctrl('k')),
            rule: parse_or(
                &keys.rule,
                KeyEvent::new(
                    KeyCode::Char('l'),
                    KeyModifiers::CONTROL | KeyModifiers::SHIFT,
                ),
            ),
            open_link: parse_or(&keys.open_link, ctrl('o')),
            escape: parse_or(&keys.escape, KeyEvent::new(KeyCode::Esc, KeyModifiers::empty())),
            enter: parse_or(&keys.enter, KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())),
            backspace: parse_or(
                &keys.backspace,
                KeyEvent::new(KeyCode::Backspace, KeyModifiers::empty()),
            ),
        }
    }
}

/// Returns true if the pressed key matches any of the given keys (code + modifiers only).
pub fn key_matches(event: KeyEvent, keys: &[KeyEvent]) -> bool {
    keys.iter()
        .any(|k| event.code == k.code && event.modifiers == k.modifiers)
}

/// Formats a key config string for display (e.g. "ctrl-q" -> "Ctrl+Q").
pub fn key_display_string(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = s.split('-').collect();
    let (mods, key_part) = if parts.len() >= 2 {
        let mod_str: Vec<String> = parts[..parts.len() - 1]
            .iter()
            .map(|p| match *p {
                "ctrl" => "Ctrl",
                "alt" => "Alt",
                "shift" => "Shift",
                _ => *p,
            })
            .map(|s| s.to_string())
            .collect();
        (mod_str.join("+"), parts[parts.len() - 1])
    } else {
        (String::new(), parts[0])
    };

    let key_display = match key_part.to_lowercase().as_str() {
        "enter" => "Enter".to_string(),
        "esc" | "escape" => "Esc".to_string(),
        "backspace" => "Backspace".to_string(),
        "tab" => "Tab".to_string(),
        "delete" => "Delete".to_string(),
        "space" => "Space".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "pageup" => "PgUp".to_string(),
        "pagedown" => "PgDn".to_string(),
        _ if key_part.len() == 1 => key_part.to_uppercase(),
        _ => key_part.to_string(),
    };

    if mods.is_empty() {
        key_display
    } else {
        format!("{}+{}", mods, key_display)
    }
}

/// Returns the tabpad config directory (~/.config/tabpad).
/// Creates it if it does not exist.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tabpad")
        .context("Could not determine XDG config directory")?;
    let config_dir = dirs.config_dir().to_path_buf();
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    Ok(config_dir)
}

/// Returns the tabpad data directory (state file, logs). Creates it if needed.
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tabpad")
        .context("Could not determine XDG data directory")?;
    let data_dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}

/// Load config from ~/.config/tabpad/config.toml.
/// Creates default config file if missing.
pub fn load_config() -> Result<Config> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join("config.toml");

    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?
    } else {
        let default = Config::default();
        let content = generate_default_config(&default);
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write default config: {}", config_path.display()))?;
        default
    };

    Ok(config)
}

fn generate_default_config(config: &Config) -> String {
    let k = &config.keys;
    format!(
        r#"# Tabpad Configuration

# Milliseconds of typing quiescence before an edit burst is saved
save_delay_ms = {}

# Width of the tab-equivalent run of spaces (1-16)
tab_width = {}

[keys]
quit = "{}"
new_note = "{}"
close_note = "{}"
next_note = "{}"
prev_note = "{}"
rename = "{}"
underline = "{}"
link = "{}"
rule = "{}"
open_link = "{}"
escape = "{}"
enter = "{}"
backspace = "{}"
"#,
        config.save_delay_ms,
        config.tab_width,
        k.quit,
        k.new_note,
        k.close_note,
        k.next_note,
        k.prev_note,
        k.rename,
        k.underline,
        k.link,
        k.rule,
        k.open_link,
        k.escape,
        k.enter,
        k.backspace,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modified_keys() {
        assert_eq!(
            parse_key_event("ctrl-q"),
            Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key_event("ctrl-shift-l"),
            Some(KeyEvent::new(
                KeyCode::Char('l'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ))
        );
        assert_eq!(
            parse_key_event("ctrl-pagedown"),
            Some(KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn parses_named_keys() {
        assert_eq!(
            parse_key_event("esc"),
            Some(KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()))
        );
        assert_eq!(parse_key_event(""), None);
        assert_eq!(parse_key_event("noSuchKey"), None);
    }

    #[test]
    fn display_string_is_human_readable() {
        assert_eq!(key_display_string("ctrl-k"), "Ctrl+K");
        assert_eq!(key_display_string("ctrl-shift-l"), "Ctrl+Shift+L");
        assert_eq!(key_display_string("ctrl-pageup"), "Ctrl+PgUp");
    }

    #[test]
    fn generated_default_config_parses_back() {
        let default = Config::default();
        let parsed: Config = toml::from_str(&generate_default_config(&default)).unwrap();
        assert_eq!(parsed.save_delay_ms, default.save_delay_ms);
        assert_eq!(parsed.tab_width, default.tab_width);
        assert_eq!(parsed.keys.quit, default.keys.quit);
        assert_eq!(parsed.keys.rule, default.keys.rule);
    }

    #[test]
    fn key_matching_compares_code_and_modifiers() {
        let keys = ResolvedKeys::from_config(&KeysConfig::default());
        let ctrl_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        let plain_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::empty());
        assert!(key_matches(ctrl_k, &[keys.link]));
        assert!(!key_matches(plain_k, &[keys.link]));
    }
}

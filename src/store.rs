// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - A tabbed scratch pad TUI

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.json";
const PROBE_FILE: &str = ".probe";

/// One named note. `content` is the pad markup as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Note {
    /// Blank note with the default "Note #<n>" title.
    pub fn numbered(n: usize) -> Self {
        Self {
            title: format!("Note #{}", n),
            content: String::new(),
        }
    }
}

/// Persisted application state. `activeIndex` keeps the historical wire key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadState {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(rename = "activeIndex", default)]
    pub active_index: usize,
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            notes: vec![Note::numbered(1)],
            active_index: 0,
        }
    }
}

impl PadState {
    /// Re-establish the invariants a loaded state must satisfy: at least one
    /// note, active index in range.
    fn repaired(mut self) -> Self {
        if self.notes.is_empty() {
            self.notes.push(Note::numbered(1));
        }
        if self.active_index >= self.notes.len() {
            self.active_index = 0;
        }
        self
    }
}

/// JSON state file in the data directory. Availability is probed once at
/// open; an unavailable store turns every save into a silent no-op so the
/// session keeps working in memory only.
pub struct Store {
    path: PathBuf,
    available: bool,
}

impl Store {
    pub fn open(dir: &Path) -> Self {
        let available = probe(dir);
        if !available {
            warn!("state directory {} is not writable, notes will not persist", dir.display());
        }
        Self {
            path: dir.join(STATE_FILE),
            available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Load the persisted state. Absent, unreadable, or malformed state all
    /// fall back to the default single blank note.
    pub fn load(&self) -> PadState {
        if !self.available {
            return PadState::default();
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("no prior state at {}", self.path.display());
                return PadState::default();
            }
        };
        match serde_json::from_str::<PadState>(&raw) {
            Ok(state) => state.repaired(),
            Err(e) => {
                warn!("discarding malformed state file {}: {}", self.path.display(), e);
                PadState::default()
            }
        }
    }

    pub fn save(&self, state: &PadState) -> Result<()> {
        if !self.available {
            return Ok(());
        }
        let json = serde_json::to_string(state)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write state file {}", self.path.display()))?;
        Ok(())
    }
}

fn probe(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(PROBE_FILE);
    if fs::write(&probe, b"probe").is_err() {
        return false;
    }
    let _ = fs::remove_file(&probe);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path());
        assert!(store.is_available());
        let state = store.load();
        assert_eq!(state, PadState::default());
        assert_eq!(state.notes[0].title, "Note #1");
        assert_eq!(state.notes[0].content, "");
    }

    #[test]
    fn malformed_state_loads_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), "{not json").unwrap();
        let store = Store::open(dir.path());
        assert_eq!(store.load(), PadState::default());
    }

    #[test]
    fn out_of_range_active_index_is_repaired() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(STATE_FILE),
            r#"{"notes":[{"title":"A","content":"x"}],"activeIndex":5}"#,
        )
        .unwrap();
        let store = Store::open(dir.path());
        let state = store.load();
        assert_eq!(state.active_index, 0);
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn empty_notes_list_is_repaired() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), r#"{"notes":[],"activeIndex":0}"#).unwrap();
        let store = Store::open(dir.path());
        let state = store.load();
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Note #1");
    }

    #[test]
    fn roundtrip_keeps_wire_key() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path());
        let state = PadState {
            notes: vec![Note::numbered(1), Note::numbered(2)],
            active_index: 1,
        };
        store.save(&state).unwrap();
        let raw = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
        assert!(raw.contains("\"activeIndex\":1"));
        assert_eq!(store.load(), state);
    }

    #[test]
    fn unavailable_store_skips_saves() {
        let dir = tempdir().unwrap();
        // A file in place of the directory makes the probe fail.
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").unwrap();
        let store = Store::open(&blocked);
        assert!(!store.is_available());
        store.save(&PadState::default()).unwrap();
        assert_eq!(store.load(), PadState::default());
    }
}

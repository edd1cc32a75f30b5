// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - A tabbed scratch pad TUI

use crate::clipboard;
use crate::config::{Config, ResolvedKeys};
use crate::format;
use crate::links;
use crate::selection::selection_text;
use crate::store::{Note, PadState, Store};
use log::{debug, warn};
use ratatui::style::{Modifier, Style};
use std::time::{Duration, Instant};
use tui_textarea::{CursorMove, TextArea};

const CLIPBOARD_TIMEOUT: Duration = Duration::from_millis(500);

/// Which surface receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Pad,
    /// Rename popup (Ctrl+r).
    Rename,
}

/// Cancellable deadline for the debounced save. Scheduling replaces any
/// pending deadline, so at most one write is ever pending.
#[derive(Debug)]
pub struct SaveTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl SaveTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn schedule_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.map_or(false, |d| now >= d)
    }
}

/// Main application state. Sole mutation authority over the note collection;
/// every mutation persists and re-syncs the pad surface before returning.
pub struct App {
    pub config: Config,
    pub resolved_keys: ResolvedKeys,
    pub store: Store,
    pub notes: Vec<Note>,
    /// Index of the note shown on the pad.
    pub active: usize,
    pub textarea: TextArea<'static>,
    pub focus: Focus,
    pub rename_input: String,
    pub message: Option<String>,
    /// Pad content has edits not yet committed to `notes[active]`.
    pub dirty: bool,
    save_timer: SaveTimer,
}

impl App {
    pub fn new(config: Config, store: Store) -> Self {
        let state = store.load();
        let save_timer = SaveTimer::new(Duration::from_millis(config.save_delay_ms));
        let resolved_keys = ResolvedKeys::from_config(&config.keys);
        let mut app = Self {
            config,
            resolved_keys,
            store,
            notes: state.notes,
            active: state.active_index,
            textarea: TextArea::default(),
            focus: Focus::Pad,
            rename_input: String::new(),
            message: None,
            dirty: false,
            save_timer,
        };
        app.sync_editor();
        app
    }

    fn state(&self) -> PadState {
        PadState {
            notes: self.notes.clone(),
            active_index: self.active,
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state()) {
            warn!("persist failed: {e:#}");
            self.message = Some(format!("Save failed: {}", e));
        }
    }

    /// Rebuild the pad surface from the active note: content reloaded,
    /// cursor and scroll reset to the top.
    pub fn sync_editor(&mut self) {
        let content = &self.notes[self.active].content;
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(|s| s.to_string()).collect()
        };
        let mut textarea = TextArea::new(lines);
        textarea.set_max_histories(50);
        textarea.set_tab_length(self.config.tab_width.clamp(1, 16));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_selection_style(Style::default().add_modifier(Modifier::REVERSED));
        textarea.move_cursor(CursorMove::Jump(0, 0));
        self.textarea = textarea;
    }

    /// Copy the pad surface into the active note.
    fn commit_active_content(&mut self) {
        self.notes[self.active].content = self.textarea.lines().join("\n");
    }

    /// Sequenced-write policy: explicit actions fold any pending debounced
    /// edit into state and cancel the deadline first, so a stale debounced
    /// write can never land after them.
    fn flush_before_action(&mut self) {
        if self.dirty {
            self.commit_active_content();
            self.dirty = false;
        }
        self.save_timer.cancel();
    }

    /// Mark the pad content changed and (re)schedule the debounced save.
    pub fn note_edited(&mut self) {
        self.note_edited_at(Instant::now());
    }

    pub fn note_edited_at(&mut self, now: Instant) {
        self.dirty = true;
        self.save_timer.schedule_at(now);
    }

    /// Commit and persist when the quiescence window has elapsed.
    /// Returns true if a write was performed.
    pub fn flush_pending_save(&mut self) -> bool {
        self.flush_pending_save_at(Instant::now())
    }

    pub fn flush_pending_save_at(&mut self, now: Instant) -> bool {
        if !self.save_timer.is_due(now) {
            return false;
        }
        self.save_timer.cancel();
        if !self.dirty {
            return false;
        }
        self.commit_active_content();
        self.dirty = false;
        self.persist();
        debug!("autosaved note {}", self.active);
        true
    }

    /// One last commit on the way out, regardless of the deadline.
    pub fn final_flush(&mut self) {
        self.save_timer.cancel();
        if self.dirty {
            self.commit_active_content();
            self.dirty = false;
            self.persist();
        }
    }

    /// Append a blank "Note #<n>" and make it active.
    pub fn create_note(&mut self) {
        self.flush_before_action();
        self.notes.push(Note::numbered(self.notes.len() + 1));
        self.active = self.notes.len() - 1;
        self.persist();
        self.sync_editor();
    }

    /// Switch the pad to the note at `index`. No-op for the active note or
    /// an out-of-range index.
    pub fn select_note(&mut self, index: usize) {
        if index == self.active || index >= self.notes.len() {
            return;
        }
        self.flush_before_action();
        self.active = index;
        self.persist();
        self.sync_editor();
    }

    pub fn next_note(&mut self) {
        self.select_note((self.active + 1) % self.notes.len());
    }

    pub fn prev_note(&mut self) {
        let index = self
            .active
            .checked_sub(1)
            .unwrap_or(self.notes.len() - 1);
        self.select_note(index);
    }

    /// Remove the note at `index`, keeping the same logical neighbor active.
    /// Closing the last remaining note recreates a blank "Note #1".
    pub fn close_note(&mut self, index: usize) {
        if index >= self.notes.len() {
            return;
        }
        self.flush_before_action();
        if index < self.active || (index == self.active && index != 0) {
            self.active -= 1;
        }
        self.notes.remove(index);
        if self.notes.is_empty() {
            self.notes.push(Note::numbered(1));
            self.active = 0;
        }
        self.persist();
        self.sync_editor();
    }

    pub fn close_active_note(&mut self) {
        self.close_note(self.active);
    }

    /// Set a note's title. Blank input leaves the title unchanged.
    pub fn rename_note(&mut self, index: usize, new_title: &str) {
        let title = new_title.trim();
        if title.is_empty() || index >= self.notes.len() {
            return;
        }
        self.flush_before_action();
        self.notes[index].title = title.to_string();
        self.persist();
    }

    // Rename popup (Ctrl+r)
    pub fn enter_rename(&mut self) {
        self.rename_input = self.notes[self.active].title.clone();
        self.focus = Focus::Rename;
    }

    pub fn exit_rename(&mut self) {
        self.focus = Focus::Pad;
        self.rename_input.clear();
    }

    pub fn rename_add_char(&mut self, c: char) {
        self.rename_input.push(c);
    }

    pub fn rename_backspace(&mut self) {
        self.rename_input.pop();
    }

    pub fn commit_rename(&mut self) {
        let title = self.rename_input.clone();
        self.rename_note(self.active, &title);
        self.exit_rename();
    }

    // Formatting shortcuts
    pub fn toggle_underline(&mut self) {
        if format::toggle_underline(&mut self.textarea) {
            self.note_edited();
        }
    }

    pub fn insert_rule(&mut self) {
        format::insert_rule(&mut self.textarea);
        self.note_edited();
    }

    pub fn insert_tab(&mut self) {
        format::insert_tab(&mut self.textarea, self.config.tab_width);
        self.note_edited();
    }

    /// Ctrl+k: linkify the selection. A selection that is itself a URL wins;
    /// otherwise a URL on the clipboard becomes the target and the selection
    /// stays as the label. Anything else is a no-op.
    pub fn linkify_shortcut(&mut self) {
        self.linkify_with(|| clipboard::read_text(CLIPBOARD_TIMEOUT));
    }

    pub fn linkify_with(&mut self, read_clipboard: impl FnOnce() -> Option<String>) {
        let selected = selection_text(&self.textarea);
        if selected.is_empty() {
            return;
        }
        if links::is_url(&selected) {
            let markup = links::link_markup(&selected, &selected);
            format::replace_selection(&mut self.textarea, &markup);
            self.note_edited();
            return;
        }
        match read_clipboard() {
            Some(clip) if links::is_url(&clip) => {
                let markup = links::link_markup(&selected, &clip);
                format::replace_selection(&mut self.textarea, &markup);
                self.note_edited();
            }
            _ => {}
        }
    }

    /// Ctrl+o: open the link under the cursor with the OS handler.
    pub fn open_link_under_cursor(&mut self) {
        let Some(url) = links::link_under_cursor(&self.textarea) else {
            return;
        };
        if let Err(e) = links::open_in_new_context(&url) {
            warn!("open link failed: {e:#}");
            self.message = Some(format!("Cannot open {}", url));
        }
    }
}

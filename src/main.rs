// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - A tabbed scratch pad TUI

mod app;
mod clipboard;
mod config;
mod format;
mod links;
mod logging;
mod selection;
mod store;
mod ui;

use anyhow::Result;
use app::{App, Focus};
use clap::Parser;
use config::key_matches;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use store::Store;
use tui_textarea::Input;

#[derive(Parser, Debug)]
#[command(name = "tabpad")]
#[command(author = "Tabpad Contributors")]
#[command(version)]
#[command(about = "A tabbed scratch pad for the terminal")]
struct CliArgs {}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Short poll so the debounced save fires close to its deadline.
    let poll_timeout = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(poll_timeout)? {
            app.flush_pending_save();
            continue;
        }

        let Ok(Event::Key(key)) = event::read() else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let k = &app.resolved_keys;

        match app.focus {
            Focus::Rename => {
                if key_matches(key, &[k.escape]) {
                    app.exit_rename();
                } else if key_matches(key, &[k.enter]) {
                    app.commit_rename();
                } else if key_matches(key, &[k.backspace]) {
                    app.rename_backspace();
                } else if let KeyCode::Char(c) = key.code {
                    app.rename_add_char(c);
                }
            }
            Focus::Pad => {
                if key_matches(key, &[k.quit]) {
                    app.final_flush();
                    break;
                }
                if key_matches(key, &[k.new_note]) {
                    app.create_note();
                    continue;
                }
                if key_matches(key, &[k.close_note]) {
                    app.close_active_note();
                    continue;
                }
                if key_matches(key, &[k.next_note]) {
                    app.next_note();
                    continue;
                }
                if key_matches(key, &[k.prev_note]) {
                    app.prev_note();
                    continue;
                }
                if key_matches(key, &[k.rename]) {
                    app.enter_rename();
                    continue;
                }
                if key_matches(key, &[k.open_link]) {
                    app.open_link_under_cursor();
                    continue;
                }
                if key_matches(key, &[k.underline]) {
                    app.toggle_underline();
                    continue;
                }
                if key_matches(key, &[k.link]) {
                    app.linkify_shortcut();
                    continue;
                }
                if key_matches(key, &[k.rule]) {
                    app.insert_rule();
                    continue;
                }
                // Tab inserts markup instead of moving focus.
                if key.code == KeyCode::Tab && key.modifiers.is_empty() {
                    app.insert_tab();
                    continue;
                }
                let input: Input = key.into();
                if app.textarea.input_without_shortcuts(input) {
                    app.note_edited();
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let _args = CliArgs::parse();

    let config = config::load_config()?;
    let data_dir = config::ensure_data_dir()?;
    if let Err(e) = logging::init(&data_dir.join("logs")) {
        eprintln!("tabpad: logging disabled: {e:#}");
    }
    let store = Store::open(&data_dir);
    let mut app = App::new(config, store);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    enable_raw_mode()?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

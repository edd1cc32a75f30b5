// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - A tabbed scratch pad TUI

use crate::app::{App, Focus};
use crate::config::key_display_string;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Center a rect within area with given size.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width,
        height: popup_height,
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_tab_strip(frame, app, chunks[1]);
    draw_pad(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    if app.focus == Focus::Rename {
        draw_rename_popup(frame, app, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Tabpad ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if !app.store.is_available() {
        spans.push(Span::styled(
            " [not persisting] ",
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(msg) = &app.message {
        spans.push(Span::styled(
            format!(" {} ", msg),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tab strip: rebuilt from scratch every frame, one label per note with the
/// active one highlighted.
fn draw_tab_strip(frame: &mut Frame, app: &App, area: Rect) {
    let tab_spans: Vec<Span> = app
        .notes
        .iter()
        .enumerate()
        .flat_map(|(i, note)| {
            let style = if i == app.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let sep = if i + 1 < app.notes.len() {
                Span::styled(" │ ", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw("")
            };
            vec![Span::styled(format!(" {} ", note.title), style), sep]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), area);
}

fn draw_pad(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" {} ", app.notes[app.active].title);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.textarea, inner);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let k = &app.config.keys;
    let hints = [
        (k.new_note.as_str(), "New"),
        (k.close_note.as_str(), "Close"),
        (k.rename.as_str(), "Rename"),
        (k.next_note.as_str(), "Next"),
        (k.underline.as_str(), "Underline"),
        (k.link.as_str(), "Link"),
        (k.rule.as_str(), "Rule"),
        (k.open_link.as_str(), "Open"),
        (k.quit.as_str(), "Quit"),
    ];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            vec![
                Span::styled(
                    format!(" {} ", key_display_string(key)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{}  ", label), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_rename_popup(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Rename Note ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let popup_area = centered_rect(area, 50, 15);
    let inner = block.inner(popup_area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(block, popup_area);

    let content = Line::from(vec![
        Span::styled("New title: ", Style::default().fg(Color::DarkGray)),
        Span::styled(&app.rename_input, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(content), inner);
}

//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Sparkline, Wrap},
    Frame,
};

use crate::config::Theme;
use crate::core::format_mmss;
use crate::features::focus::TimerPhase;
use crate::features::todos::TodoList;
use crate::tui::app::{App, Panel};
use crate::tui::event::HELP;

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    accent: Color,
    muted: Color,
    selected_bg: Color,
    warning: Color,
}

impl Palette {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                selected_bg: Color::DarkGray,
                warning: Color::Yellow,
            },
            Theme::Light => Self {
                text: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                selected_bg: Color::Gray,
                warning: Color::Red,
            },
        }
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let palette = Palette::for_theme(app.theme());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock
            Constraint::Length(3), // Progress
            Constraint::Length(4), // Waveform
            Constraint::Length(4), // Music
            Constraint::Min(3),    // Quote
        ])
        .split(body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    render_header(frame, app, palette, chunks[0]);
    render_clock(frame, app, palette, left[0]);
    render_progress(frame, app, palette, left[1]);
    render_waveform(frame, app, palette, left[2]);
    render_music(frame, app, palette, left[3]);
    render_quote(frame, app, palette, left[4]);
    render_todos(frame, app, palette, right[0]);
    render_notes(frame, app, palette, right[1]);
    render_status_bar(frame, app, palette, chunks[2]);

    if app.input.is_some() {
        render_input(frame, app, palette);
    } else if app.show_help {
        render_help(frame, palette);
    }
}

fn block(title: &str, palette: Palette, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.accent } else { palette.muted }))
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let mut spans = vec![Span::styled(
        " Focus Space ",
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )];

    if app.timer.is_break_due() {
        spans.push(Span::styled(
            "  Time for a break! (b)",
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );

    frame.render_widget(header, area);
}

fn render_clock(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let phase = app.timer.phase();
    let phase_style = match phase {
        TimerPhase::Running => Style::default().fg(Color::Green),
        TimerPhase::Paused => Style::default().fg(palette.warning),
        TimerPhase::Completed => Style::default().fg(palette.accent),
        TimerPhase::Idle => Style::default().fg(palette.muted),
    };

    let length = app.timer.active_preset().map_or_else(
        || format!("Custom ({}min)", app.timer.duration_seconds() / 60),
        |p| p.to_string(),
    );

    let lines = vec![
        Line::from(Span::styled(
            format_mmss(app.timer.remaining_seconds()),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(phase.to_string(), phase_style)),
        Line::from(Span::styled(
            format!(
                "{length}  break every {}min",
                app.timer.break_reminder_minutes()
            ),
            Style::default().fg(palette.muted),
        )),
    ];

    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block("Timer", palette, false));
    frame.render_widget(clock, area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let gauge = Gauge::default()
        .block(block("Progress", palette, false))
        .gauge_style(Style::default().fg(palette.accent))
        .ratio(app.timer.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn render_waveform(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let data = app.waveform.scaled(10);
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
        .data(&data)
        .max(10)
        .style(Style::default().fg(palette.accent));
    frame.render_widget(sparkline, area);
}

fn render_music(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let music = &app.music;
    let state = if music.is_playing() { "Playing" } else { "Paused" };
    let volume = if music.is_muted() {
        "muted".to_string()
    } else {
        format!("{:.0}%", music.volume() * 100.0)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                music.current_track_name(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {state}"), Style::default().fg(palette.muted)),
        ]),
        Line::from(Span::styled(
            format!("Volume {volume}"),
            Style::default().fg(palette.muted),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block("Ambient", palette, false)),
        area,
    );
}

fn render_quote(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let quote = Paragraph::new(Span::styled(
        format!("\"{}\"", app.quote.current()),
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block("Quote", palette, false));
    frame.render_widget(quote, area);
}

/// Render the todo list.
fn render_todos(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let focused = app.panel == Panel::Todos;
    let items: Vec<ListItem<'_>> = app
        .todos
        .items()
        .iter()
        .map(|todo| {
            let (icon, color) = if todo.completed {
                ("[x] ", Color::Green)
            } else {
                ("[ ] ", palette.text)
            };
            let text_style = if todo.completed {
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::styled(todo.text.as_str(), text_style),
            ]))
        })
        .collect();

    render_list(frame, items, &todos_title(&app.todos), palette, focused, app.todo_selected, area);
}

fn todos_title(todos: &TodoList) -> String {
    if todos.is_empty() {
        return "Todos".to_string();
    }
    format!(
        "Todos {} open, {} done",
        todos.open_count(),
        todos.completed_count()
    )
}

fn render_notes(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let focused = app.panel == Panel::Notes;
    let items: Vec<ListItem<'_>> = app
        .notes
        .notes()
        .iter()
        .map(|note| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    note.display_date(),
                    Style::default().fg(palette.muted),
                )),
                Line::from(Span::styled(
                    note.content.as_str(),
                    Style::default().fg(palette.text),
                )),
            ])
        })
        .collect();

    let title = format!("Notes {}", app.notes.len());
    render_list(frame, items, &title, palette, focused, app.note_selected, area);
}

fn render_list(
    frame: &mut Frame<'_>,
    items: Vec<ListItem<'_>>,
    title: &str,
    palette: Palette,
    focused: bool,
    selected: usize,
    area: Rect,
) {
    let empty = items.is_empty();
    let list = List::new(items)
        .block(block(title, palette, focused))
        .highlight_style(Style::default().bg(palette.selected_bg));

    let mut state = ListState::default();
    if focused && !empty {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | 1/2:presets | m:music | a:add | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(palette.muted));
    frame.render_widget(status, area);
}

fn render_input(frame: &mut Frame<'_>, app: &App<'_>, palette: Palette) {
    let Some(input) = app.input.as_ref() else {
        return;
    };
    let area = centered(frame.area(), 60, 3);
    let prompt = Paragraph::new(format!("{}_", input.buffer))
        .style(Style::default().fg(palette.text))
        .block(block(input.mode.prompt(), palette, true));

    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

fn render_help(frame: &mut Frame<'_>, palette: Palette) {
    let area = centered(frame.area(), 70, 8);
    let help = Paragraph::new(HELP)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(palette.text))
        .block(block("Keys", palette, true));

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// A rectangle `width` percent wide and `height` rows tall in the middle of `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = area.width.saturating_mul(width) / 100;
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

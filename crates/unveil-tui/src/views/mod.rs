//! View composition for the single player screen.

pub mod input;
pub mod story;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::shared::{self, fmt_clock};

/// Draw the whole player frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let input_height = if app.visible_gate().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title bar
            Constraint::Min(0),               // Story
            Constraint::Length(input_height), // Gate input (when listening)
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    story::draw(frame, app, chunks[1]);
    if input_height > 0 {
        input::draw(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, chunks[3]);

    if let Some(message) = &app.alert {
        shared::draw_alert_popup(frame, message);
    }
    if app.show_help {
        shared::draw_help_popup(frame);
    }
}

/// Title, reveal progress, and the story clock.
fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let script = app.engine.script();
    let revealed = app
        .engine
        .stages_with_status()
        .filter(|(_, status)| *status != unveil_engine::StageStatus::Hidden)
        .count();

    let line = Line::from(vec![
        Span::styled(
            script.meta.title.clone(),
            Style::default().fg(Color::White).bold(),
        ),
        Span::styled(
            format!("  {revealed}/{}", script.stage_count()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {}", fmt_clock(app.engine.now_ms())),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Ambient-music state plus context-sensitive key hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let ambient = app.engine.ambient();
    let music = if !ambient.is_playing() {
        "\u{266a} off".to_string()
    } else if ambient.is_ducked() {
        "\u{266a} (ducked)".to_string()
    } else {
        let track = ambient.current_track().unwrap_or("?");
        format!("\u{266a} {track}")
    };

    let hints = if app.alert.is_some() {
        "any key:dismiss".to_string()
    } else if app.show_help {
        "?:close help".to_string()
    } else if app.gate_focused() {
        "Enter:submit  Esc:clear  Tab:hint  Ctrl+E:echo  Ctrl+C:quit".to_string()
    } else {
        let mut parts = Vec::new();
        if app.current_video().is_some() {
            parts.push("Space:video");
        }
        if app.engine.armed_button().is_some() {
            parts.push("g:continue");
        }
        parts.push("m:music");
        parts.push("\u{2191}\u{2193}:scroll");
        parts.push("?:help");
        parts.push("q:quit");
        parts.join("  ")
    };

    let bar = Paragraph::new(format!("{music}  |  {hints}"))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(bar, area);
}

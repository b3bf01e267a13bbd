//! The scrolling story pane: typed text, media widgets, and the button.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unveil_core::media::MediaKind;
use unveil_core::stage::Stage;
use unveil_engine::{MediaPhase, MediaRuntime, StageStatus};

use crate::app::App;
use crate::shared::{fmt_position, progress_bar};

/// Draw the story log with everything revealed so far.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let lines = build_lines(app);

    // Wrapped-height bookkeeping so the offset counts rendered rows,
    // not logical lines.
    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: u16 = lines
        .iter()
        .map(|l| {
            let len = l.width();
            if inner_width == 0 {
                1
            } else {
                len.max(1).div_ceil(inner_width) as u16
            }
        })
        .sum();

    let visible_height = area.height.saturating_sub(2);
    let max_scroll = total_wrapped.saturating_sub(visible_height);
    let scroll = max_scroll.saturating_sub(app.scroll_offset.min(max_scroll));

    let title = format!(" {} ", app.engine.script().meta.title);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Flatten the revealed portion of the story into styled lines.
fn build_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !app.engine.is_started() {
        lines.push(Line::from(Span::styled(
            "(not started)",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let mut first = true;
    for (stage, status) in app.engine.stages_with_status() {
        if status == StageStatus::Hidden {
            continue;
        }
        if !first {
            lines.push(Line::from(""));
        }
        first = false;
        push_stage_lines(app, stage, status, &mut lines);
    }

    if app.engine.is_finished() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "\u{2727} The End \u{2727}",
            Style::default().fg(Color::Magenta).bold(),
        )));
    } else if first {
        // Nothing activated yet: the start delay is still running.
        lines.push(Line::from(Span::styled(
            "\u{2026}",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

/// Append one stage's text, hint, media, and button lines.
fn push_stage_lines(app: &App, stage: &Stage, status: StageStatus, lines: &mut Vec<Line<'static>>) {
    let text_style = match status {
        StageStatus::Active => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::Gray),
    };

    if let Some(surface) = app.engine.surface(&stage.surface) {
        for text_line in surface.text().lines() {
            lines.push(Line::from(Span::styled(text_line.to_string(), text_style)));
        }
        // A trailing block cursor while the typewriter is mid-reveal.
        if status == StageStatus::Active && !surface.is_complete() && !surface.text().is_empty() {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled("\u{2588}", Style::default().fg(Color::White)));
            }
        }
    }

    if status == StageStatus::Active
        && let Some(gate) = app.visible_gate()
        && let Some(hint) = gate.visible_hint()
    {
        lines.push(Line::from(Span::styled(
            format!("  hint: {hint}"),
            Style::default().fg(Color::Yellow).italic(),
        )));
    }

    if let Some(media_id) = &stage.media
        && let Some(media) = app.engine.media_runtime(media_id)
        && media.phase() != MediaPhase::Hidden
    {
        push_media_lines(media, lines);
    }

    if let Some((button_stage, label)) = app.engine.armed_button()
        && *button_stage == stage.id
    {
        lines.push(Line::from(Span::styled(
            format!("  \u{25b8} [ {label} ]  (press g)"),
            Style::default().fg(Color::Green).bold(),
        )));
    }
}

/// Append a revealed media item as log lines.
fn push_media_lines(media: &MediaRuntime, lines: &mut Vec<Line<'static>>) {
    let spec = media.spec();
    let label = spec.caption.clone().unwrap_or_else(|| spec.source.clone());

    match spec.kind {
        MediaKind::Photo => {
            lines.push(Line::from(Span::styled(
                format!("  \u{25a3} {label}"),
                Style::default().fg(Color::Cyan),
            )));
        }
        MediaKind::Video => {
            lines.push(Line::from(Span::styled(
                format!("  \u{25b6} {label}"),
                Style::default().fg(Color::Cyan),
            )));
            lines.push(video_state_line(media));
        }
    }
}

/// One line summarizing a video's playback state.
fn video_state_line(media: &MediaRuntime) -> Line<'static> {
    let position = fmt_position(media.position_ms());
    let (summary, color) = match media.phase() {
        MediaPhase::Ready => ("ready - press Space to play".to_string(), Color::DarkGray),
        MediaPhase::Playing => (playing_summary(media, &position), Color::Green),
        MediaPhase::Paused => (format!("paused at {position}"), Color::Yellow),
        MediaPhase::Ended => ("finished".to_string(), Color::DarkGray),
        MediaPhase::Hidden => (String::new(), Color::DarkGray),
    };
    Line::from(Span::styled(
        format!("    {summary}"),
        Style::default().fg(color),
    ))
}

fn playing_summary(media: &MediaRuntime, position: &str) -> String {
    match (media.progress(), media.spec().duration_ms) {
        (Some(progress), Some(duration)) => {
            format!(
                "{} {position} / {}",
                progress_bar(progress),
                fmt_position(duration)
            )
        }
        _ => format!("playing - {position}"),
    }
}

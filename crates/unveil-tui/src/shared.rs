//! Shared view utilities: popups, layout helpers, and small formatters.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the blocking alert popup a rejected gate raises.
pub fn draw_alert_popup(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 20, frame.area());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" ! ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(55, 65, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("While a gate asks for an answer:"),
        Line::from("  Enter       Submit"),
        Line::from("  Esc         Clear the field"),
        Line::from("  Tab         Reveal the hint"),
        Line::from("  Ctrl+E      Show / mask what you typed"),
        Line::from(""),
        Line::from("Otherwise:"),
        Line::from("  Space       Play / pause the current video"),
        Line::from("  g           Press the reveal button"),
        Line::from("  m           Music on / off"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from("Anytime:"),
        Line::from("  \u{2191}/\u{2193} PgUp/PgDn  Scroll the story"),
        Line::from("  End         Jump back to the newest line"),
        Line::from("  ?           Toggle this help"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Format a story-clock timestamp like `t+4.6s`.
pub fn fmt_clock(ms: u64) -> String {
    format!("t+{}.{}s", ms / 1_000, (ms % 1_000) / 100)
}

/// Format a media position like `0:42`.
pub fn fmt_position(ms: u64) -> String {
    let secs = ms / 1_000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Render a ten-slot text progress bar like `[####------]`.
pub fn progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * 10.0).round() as usize;
    let empty = 10_usize.saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_tenths() {
        assert_eq!(fmt_clock(0), "t+0.0s");
        assert_eq!(fmt_clock(4_600), "t+4.6s");
        assert_eq!(fmt_clock(61_050), "t+61.0s");
    }

    #[test]
    fn position_formats_minutes_and_seconds() {
        assert_eq!(fmt_position(0), "0:00");
        assert_eq!(fmt_position(42_000), "0:42");
        assert_eq!(fmt_position(90_500), "1:30");
    }

    #[test]
    fn progress_bar_clamps_and_fills() {
        assert_eq!(progress_bar(0.0), "[----------]");
        assert_eq!(progress_bar(0.5), "[#####-----]");
        assert_eq!(progress_bar(1.0), "[##########]");
        assert_eq!(progress_bar(2.5), "[##########]");
    }
}

//! The gate input row: a one-line field with masked echo and a cursor.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

/// Draw the gate input field.
///
/// Masked gates echo one dot per typed character until the echo toggle
/// flips them to plain text.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(gate) = app.visible_gate() else {
        return;
    };

    let echoed = if gate.echo_visible() {
        app.input_text.clone()
    } else {
        "\u{2022}".repeat(app.input_text.chars().count())
    };

    let title = if gate.echo_visible() {
        " Answer (Ctrl+E to mask) "
    } else {
        " Answer "
    };

    let field = Paragraph::new(format!("> {echoed}")).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(field, area);

    // Cursor column counts characters, not bytes, so it stays put on
    // masked multibyte input. Offset by 2 for "> " plus the border.
    let typed_chars = app.input_text[..app.input_cursor].chars().count() as u16;
    let cursor_x = area.x + 1 + 2 + typed_chars;
    let cursor_y = area.y + 1;
    if app.gate_focused() && cursor_x < area.x + area.width - 1 {
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

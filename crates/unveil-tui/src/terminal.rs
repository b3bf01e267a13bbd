//! Terminal setup, the frame loop, and key dispatch.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::app::App;
use crate::views;

/// Frame budget: how long to wait for input before the next engine tick.
const TICK_MS: u64 = 33;

/// Run the player until the user quits.
///
/// Restores the terminal on every exit path, then shuts the engine down
/// so nothing is left nominally playing.
pub fn run(mut app: App) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    app.engine.shutdown();
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Draw, poll, advance; the engine runs on wall time between frames.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    let mut last_frame = Instant::now();
    loop {
        let delta = last_frame.elapsed().as_millis() as u64;
        last_frame = Instant::now();
        app.tick(delta);

        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if event::poll(Duration::from_millis(TICK_MS)).map_err(|e| format!("event error: {e}"))? {
            match event::read().map_err(|e| format!("event error: {e}"))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Every keypress counts as the first user gesture, which is what
    // arms the one-shot music autostart.
    app.engine.user_interacted();

    if app.alert.is_some() {
        app.dismiss_alert();
        return;
    }

    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return;
    }

    // Story scrolling works whether or not a gate has focus.
    match key.code {
        KeyCode::Up => {
            app.scroll_up(1);
            return;
        }
        KeyCode::Down => {
            app.scroll_down(1);
            return;
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            return;
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            return;
        }
        _ => {}
    }

    if app.gate_focused() {
        handle_gate_key(app, key);
    } else {
        handle_browse_key(app, key);
    }
}

/// Keys while a gate input has focus. Plain characters go to the buffer.
fn handle_gate_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('e') {
            app.toggle_echo();
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.clear_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_text.len(),
        KeyCode::Tab => app.reveal_hint(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
}

/// Keys while no gate is listening.
fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(' ') => app.play_pause(),
        KeyCode::Char('g') => app.press_button(),
        KeyCode::Char('m') => app.toggle_music(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::End => app.scroll_to_bottom(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.engine.user_interacted();
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(1),
        MouseEventKind::ScrollDown => app.scroll_down(1),
        _ => {}
    }
}

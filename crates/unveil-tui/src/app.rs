//! Player state: the engine plus everything the views need to draw it.

use unveil_core::media::{MediaId, MediaKind};
use unveil_core::script::Script;
use unveil_engine::{EngineConfig, GateOutcome, GateRuntime, MediaPhase, Orchestrator};

/// Terminal player state.
///
/// Wraps the playback engine together with the view-only state the
/// terminal front-end needs: the gate input buffer, story scroll
/// position, and whichever popup is currently raised.
pub struct App {
    /// The playback engine driving the story.
    pub engine: Orchestrator,
    /// Current gate input text.
    pub input_text: String,
    /// Cursor position within the input text, as a byte offset.
    pub input_cursor: usize,
    /// Story scroll offset, counted in rows up from the bottom.
    pub scroll_offset: u16,
    /// Blocking alert message, raised when a gate rejects a submission.
    pub alert: Option<String>,
    /// Whether the help popup is visible.
    pub show_help: bool,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    /// Create a player for the given script and start the engine.
    pub fn new(script: Script, config: EngineConfig) -> Self {
        let mut engine = Orchestrator::new(script, config);
        engine.start();
        Self {
            engine,
            input_text: String::new(),
            input_cursor: 0,
            scroll_offset: 0,
            alert: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Advance the engine by the elapsed wall time since the last frame.
    ///
    /// Engine-side scroll requests yank the view back to the newest
    /// content, so a reader who has not scrolled away follows the story
    /// as it lands. Under reduced motion the engine emits none.
    pub fn tick(&mut self, delta_ms: u64) {
        self.engine.advance(delta_ms);
        if !self.engine.drain_scroll_requests().is_empty() {
            self.scroll_offset = 0;
        }
    }

    /// The gate the input row belongs to: the frontier stage's gate,
    /// until it accepts.
    pub fn visible_gate(&self) -> Option<&GateRuntime> {
        self.engine.active_gate().filter(|gate| !gate.is_unlocked())
    }

    /// True while a gate is waiting and no popup is eating keystrokes.
    pub fn gate_focused(&self) -> bool {
        self.alert.is_none() && !self.show_help && self.visible_gate().is_some()
    }

    /// Submit the input buffer to the waiting gate.
    ///
    /// A rejection raises the alert popup with the gate's error message
    /// and leaves the typed text in place for another try; an acceptance
    /// clears the buffer and lets the story move on.
    pub fn submit_input(&mut self) {
        let raw = self.input_text.clone();
        let message = self
            .engine
            .active_gate()
            .map(|gate| gate.spec().error_message.clone());
        match self.engine.submit_gate(&raw) {
            Some(GateOutcome::Accepted) => self.clear_input(),
            Some(GateOutcome::Rejected) => self.alert = message,
            None => {}
        }
    }

    /// Clear the gate input buffer.
    pub fn clear_input(&mut self) {
        self.input_text.clear();
        self.input_cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn input_push(&mut self, c: char) {
        self.input_text.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn input_backspace(&mut self) {
        if self.input_cursor > 0 {
            let prev = self.input_text[..self.input_cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input_text.remove(prev);
            self.input_cursor = prev;
        }
    }

    /// Move the cursor one character left.
    pub fn cursor_left(&mut self) {
        if self.input_cursor > 0 {
            let prev = self.input_text[..self.input_cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input_cursor = prev;
        }
    }

    /// Move the cursor one character right.
    pub fn cursor_right(&mut self) {
        if self.input_cursor < self.input_text.len() {
            let next = self.input_text[self.input_cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.input_cursor + i)
                .unwrap_or(self.input_text.len());
            self.input_cursor = next;
        }
    }

    /// Scroll the story up (away from the newest content).
    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }

    /// Scroll the story down, re-engaging follow mode at the bottom.
    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    /// Jump back to the newest content.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Play or pause the most recently revealed video.
    pub fn play_pause(&mut self) {
        let Some(id) = self.current_video() else {
            return;
        };
        match self.engine.media_runtime(&id).map(|m| m.phase()) {
            Some(MediaPhase::Playing) => self.engine.media_pause(&id),
            Some(MediaPhase::Ready | MediaPhase::Paused) => self.engine.media_play(&id),
            _ => {}
        }
    }

    /// The video the play/pause key should act on, if any.
    ///
    /// Walks the script backwards for the newest revealed video, so a
    /// film still running on an already-passed stage can be paused.
    pub fn current_video(&self) -> Option<MediaId> {
        self.engine
            .script()
            .stages
            .iter()
            .rev()
            .filter_map(|stage| stage.media.as_ref())
            .filter_map(|id| self.engine.media_runtime(id))
            .find(|m| m.spec().kind == MediaKind::Video && m.phase() != MediaPhase::Hidden)
            .map(|m| m.spec().id.clone())
    }

    /// Reveal the waiting gate's hint, if it has one.
    pub fn reveal_hint(&mut self) {
        self.engine.reveal_hint();
    }

    /// Toggle plain-text echo on the waiting gate's input.
    pub fn toggle_echo(&mut self) {
        self.engine.toggle_gate_echo();
    }

    /// Press the armed reveal button, if one is showing.
    pub fn press_button(&mut self) {
        self.engine.press_button();
    }

    /// Toggle the ambient playlist.
    pub fn toggle_music(&mut self) {
        self.engine.toggle_ambient();
    }

    /// Dismiss the alert popup and hand focus back to the gate input.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Toggle the help popup.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::ambient::AmbientSpec;
    use unveil_core::gate::GateSpec;
    use unveil_core::script::ScriptMeta;
    use unveil_core::stage::{Advance, Stage};

    fn gate_app() -> App {
        let mut script = Script::new(ScriptMeta::new("Test"));
        script.stages.push(
            Stage::new(
                "door",
                "door-text",
                "Say the word.",
                Advance::OnGate { pause_ms: 0 },
            )
            .with_gate("door"),
        );
        script.stages.push(Stage::new("end", "end-text", "", Advance::End));
        script.gates.push(GateSpec::with_secret("door", "open"));
        script.ambient = AmbientSpec::new(vec!["a.mp3".into()]);
        let config = EngineConfig::default()
            .with_speed(1)
            .with_start_delay(0);
        App::new(script, config)
    }

    fn settle(app: &mut App) {
        for _ in 0..200 {
            app.tick(10);
        }
    }

    #[test]
    fn rejection_raises_the_alert_and_keeps_the_buffer() {
        let mut app = gate_app();
        settle(&mut app);
        assert!(app.gate_focused());

        for c in "wrong".chars() {
            app.input_push(c);
        }
        app.submit_input();

        assert_eq!(app.alert.as_deref(), Some("Wrong password. Try again!"));
        assert_eq!(app.input_text, "wrong");
        assert!(!app.gate_focused());

        app.dismiss_alert();
        assert!(app.gate_focused());
    }

    #[test]
    fn acceptance_clears_the_buffer_without_an_alert() {
        let mut app = gate_app();
        settle(&mut app);

        for c in "open".chars() {
            app.input_push(c);
        }
        app.submit_input();

        assert!(app.alert.is_none());
        assert!(app.input_text.is_empty());
    }

    #[test]
    fn backspace_and_cursor_moves_respect_char_boundaries() {
        let mut app = gate_app();
        app.input_push('u');
        app.input_push('\u{00fc}');
        app.input_push('!');
        assert_eq!(app.input_text, "u\u{00fc}!");

        app.cursor_left();
        app.input_backspace();
        assert_eq!(app.input_text, "u!");

        app.cursor_right();
        app.input_backspace();
        assert_eq!(app.input_text, "u");
    }

    #[test]
    fn engine_scroll_requests_reengage_follow_mode() {
        let mut app = gate_app();
        app.scroll_up(5);
        assert_eq!(app.scroll_offset, 5);

        // The start delay elapses and the first stage activates, which
        // queues a scroll request that yanks the view back down.
        settle(&mut app);
        assert_eq!(app.scroll_offset, 0);
    }
}

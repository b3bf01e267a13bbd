use unveil_core::GateSpec;

/// Verdict on a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The answer matched; the gate is (or already was) unlocked.
    Accepted,
    /// The answer did not match; the gate stays locked.
    Rejected,
}

/// Live state of one gate during playback.
///
/// Unlocking is terminal: once a gate has accepted an answer it never
/// locks again, and further attempts are accepted without re-checking.
/// Attempts are never limited or throttled.
#[derive(Debug)]
pub struct GateRuntime {
    spec: GateSpec,
    unlocked: bool,
    hint_shown: bool,
    echo_visible: bool,
}

impl GateRuntime {
    /// Wrap a gate definition for playback.
    pub fn new(spec: GateSpec) -> Self {
        let echo_visible = !spec.masked;
        Self {
            spec,
            unlocked: false,
            hint_shown: false,
            echo_visible,
        }
    }

    /// Judge a submitted answer.
    pub fn attempt(&mut self, raw: &str) -> GateOutcome {
        if self.unlocked {
            return GateOutcome::Accepted;
        }
        if self.spec.accepts(raw) {
            self.unlocked = true;
            GateOutcome::Accepted
        } else {
            GateOutcome::Rejected
        }
    }

    /// Show the hint. Returns `true` the first time only.
    pub fn reveal_hint(&mut self) -> bool {
        if self.hint_shown || self.spec.hint.is_none() {
            return false;
        }
        self.hint_shown = true;
        true
    }

    /// Flip between masked and plain input echo.
    pub fn toggle_echo(&mut self) {
        self.echo_visible = !self.echo_visible;
    }

    /// The underlying gate definition.
    pub fn spec(&self) -> &GateSpec {
        &self.spec
    }

    /// Whether the gate has accepted an answer.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Whether the hint has been shown.
    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// The hint text, once shown.
    pub fn visible_hint(&self) -> Option<&str> {
        if self.hint_shown {
            self.spec.hint.as_deref()
        } else {
            None
        }
    }

    /// Whether typed input should be echoed in plain text.
    pub fn echo_visible(&self) -> bool {
        self.echo_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GateRuntime {
        GateRuntime::new(
            GateSpec::with_secret("door", "open sesame").with_hint("A very old phrase."),
        )
    }

    #[test]
    fn wrong_then_right() {
        let mut g = gate();
        assert_eq!(g.attempt("open says me"), GateOutcome::Rejected);
        assert!(!g.is_unlocked());
        assert_eq!(g.attempt("  open sesame "), GateOutcome::Accepted);
        assert!(g.is_unlocked());
    }

    #[test]
    fn unlocked_is_terminal() {
        let mut g = gate();
        g.attempt("open sesame");
        assert_eq!(g.attempt("garbage"), GateOutcome::Accepted);
        assert!(g.is_unlocked());
    }

    #[test]
    fn hint_reveals_once() {
        let mut g = gate();
        assert_eq!(g.visible_hint(), None);
        assert!(g.reveal_hint());
        assert_eq!(g.visible_hint(), Some("A very old phrase."));
        assert!(!g.reveal_hint());
    }

    #[test]
    fn hintless_gate_never_reveals() {
        let mut g = GateRuntime::new(GateSpec::with_secret("bare", "x"));
        assert!(!g.reveal_hint());
        assert_eq!(g.visible_hint(), None);
    }

    #[test]
    fn echo_follows_masking_then_toggles() {
        let mut g = gate();
        assert!(!g.echo_visible());
        g.toggle_echo();
        assert!(g.echo_visible());

        let open = GateRuntime::new(GateSpec::with_secret("open", "x").unmasked());
        assert!(open.echo_visible());
    }
}

use unveil_core::{StageId, SurfaceId};

/// Result of starting a text reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A session started; the first character is ready to reveal.
    Started,
    /// The text was empty; the phase is complete without a session.
    InstantlyComplete,
    /// Another session is running; the request was dropped.
    Rejected,
}

/// Result of revealing one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// One character revealed; more remain.
    Revealed {
        /// Surface the character belongs to.
        surface: SurfaceId,
        /// The revealed character.
        ch: char,
    },
    /// The final character was revealed and the session is over.
    Completed {
        /// Surface the character belongs to.
        surface: SurfaceId,
        /// The revealed character.
        ch: char,
        /// Stage whose text just finished.
        stage: StageId,
    },
    /// No session is running.
    Idle,
}

#[derive(Debug)]
struct Session {
    stage: StageId,
    surface: SurfaceId,
    chars: Vec<char>,
    index: usize,
}

/// The character-by-character text reveal.
///
/// At most one session runs at a time, story-wide: starting a reveal
/// while another is active is a dropped no-op, with no queueing and no
/// interruption. A session reveals exactly one character per step, in
/// order — a literal `'\n'` is a line-break unit and still costs one
/// step. The lock is released the moment the last character lands; the
/// completion hold that follows is the scheduler's business, not ours.
#[derive(Debug, Default)]
pub struct Typewriter {
    session: Option<Session>,
}

impl Typewriter {
    /// Create an idle typewriter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start revealing `text` into `surface`.
    pub fn begin(&mut self, stage: StageId, surface: SurfaceId, text: &str) -> BeginOutcome {
        if self.session.is_some() {
            return BeginOutcome::Rejected;
        }
        if text.is_empty() {
            return BeginOutcome::InstantlyComplete;
        }
        self.session = Some(Session {
            stage,
            surface,
            chars: text.chars().collect(),
            index: 0,
        });
        BeginOutcome::Started
    }

    /// Reveal the next character of the running session.
    pub fn step(&mut self) -> StepResult {
        let Some(mut session) = self.session.take() else {
            return StepResult::Idle;
        };
        let ch = session.chars[session.index];
        session.index += 1;
        if session.index == session.chars.len() {
            StepResult::Completed {
                surface: session.surface,
                ch,
                stage: session.stage,
            }
        } else {
            let surface = session.surface.clone();
            self.session = Some(session);
            StepResult::Revealed { surface, ch }
        }
    }

    /// Whether a session is running.
    pub fn is_typing(&self) -> bool {
        self.session.is_some()
    }

    /// Surface of the running session, if any.
    pub fn active_surface(&self) -> Option<&SurfaceId> {
        self.session.as_ref().map(|s| &s.surface)
    }

    /// Characters not yet revealed in the running session.
    pub fn remaining(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.chars.len() - s.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(tw: &mut Typewriter, text: &str) -> BeginOutcome {
        tw.begin(StageId::new("s"), SurfaceId::new("out"), text)
    }

    #[test]
    fn reveals_each_character_in_order() {
        let mut tw = Typewriter::new();
        assert_eq!(begin(&mut tw, "hi\nyo"), BeginOutcome::Started);

        let mut seen = String::new();
        loop {
            match tw.step() {
                StepResult::Revealed { ch, .. } => seen.push(ch),
                StepResult::Completed { ch, stage, .. } => {
                    seen.push(ch);
                    assert_eq!(stage, StageId::new("s"));
                    break;
                }
                StepResult::Idle => panic!("session ended early"),
            }
        }
        assert_eq!(seen, "hi\nyo");
        assert!(!tw.is_typing());
    }

    #[test]
    fn newline_is_one_step() {
        let mut tw = Typewriter::new();
        begin(&mut tw, "a\nb");
        assert_eq!(tw.remaining(), 3);
        tw.step();
        assert_eq!(tw.remaining(), 2);
    }

    #[test]
    fn second_begin_is_rejected_while_typing() {
        let mut tw = Typewriter::new();
        assert_eq!(begin(&mut tw, "first"), BeginOutcome::Started);
        assert_eq!(begin(&mut tw, "second"), BeginOutcome::Rejected);
        // The running session is untouched.
        assert_eq!(tw.remaining(), 5);
    }

    #[test]
    fn empty_text_completes_without_a_session() {
        let mut tw = Typewriter::new();
        assert_eq!(begin(&mut tw, ""), BeginOutcome::InstantlyComplete);
        assert!(!tw.is_typing());
        assert_eq!(tw.step(), StepResult::Idle);
    }

    #[test]
    fn lock_releases_on_the_last_character() {
        let mut tw = Typewriter::new();
        begin(&mut tw, "ab");
        tw.step();
        assert!(tw.is_typing());
        let last = tw.step();
        assert!(matches!(last, StepResult::Completed { .. }));
        assert!(!tw.is_typing());
        assert_eq!(begin(&mut tw, "next"), BeginOutcome::Started);
    }

    #[test]
    fn single_character_completes_immediately() {
        let mut tw = Typewriter::new();
        begin(&mut tw, "x");
        assert!(matches!(tw.step(), StepResult::Completed { ch: 'x', .. }));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// N characters always take exactly N steps, in order, with
            /// no skips or duplicates.
            #[test]
            fn one_full_pass_in_order(text in "\\PC{1,64}") {
                let mut tw = Typewriter::new();
                prop_assume!(!text.is_empty());
                prop_assert_eq!(begin(&mut tw, &text), BeginOutcome::Started);

                let expected: Vec<char> = text.chars().collect();
                let mut revealed = Vec::new();
                for _ in 0..expected.len() {
                    match tw.step() {
                        StepResult::Revealed { ch, .. } => revealed.push(ch),
                        StepResult::Completed { ch, .. } => revealed.push(ch),
                        StepResult::Idle => break,
                    }
                }
                prop_assert_eq!(revealed, expected);
                prop_assert!(!tw.is_typing());
                prop_assert_eq!(tw.step(), StepResult::Idle);
            }
        }
    }
}

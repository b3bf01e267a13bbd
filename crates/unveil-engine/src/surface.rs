/// A text buffer the typewriter reveals into.
///
/// Front-ends render the buffer as-is; literal `'\n'` characters are the
/// line-break units. `complete` distinguishes a surface that is still
/// being typed from one whose full text has landed.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    text: String,
    complete: bool,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the buffer for a fresh reveal.
    pub fn begin(&mut self) {
        self.text.clear();
        self.complete = false;
    }

    /// Append one revealed character.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Mark the full text as revealed.
    pub fn finish(&mut self) {
        self.complete = true;
    }

    /// The revealed text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the full text has been revealed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether nothing has been revealed yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

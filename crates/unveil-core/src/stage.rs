use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::GateId;
use crate::media::MediaId;

/// Identifier of a stage in the story sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub String);

impl StageId {
    /// Create a stage identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a text surface a stage types into.
///
/// Surfaces are the rendering contract between a script and a front-end:
/// the engine writes revealed text into the surface buffer named here, and
/// a missing surface simply renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub String);

impl SurfaceId {
    /// Create a surface identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The rule that moves the story past a stage.
///
/// Every stage carries exactly one transition rule. Delays are measured on
/// the engine's story clock, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum Advance {
    /// Advance once the stage text finishes typing, after a fixed pause.
    AfterText {
        /// Delay between text completion and the next stage, in ms.
        pause_ms: u64,
    },
    /// Advance when the stage's media reports ended (plus `pause_ms`), or
    /// when `ceiling_ms` elapses after the media reveal — whichever fires
    /// first. `ceiling_ms: None` waits for the ended report alone.
    AfterMedia {
        /// Delay between the media ended report and the next stage, in ms.
        pause_ms: u64,
        /// Hard upper bound counted from the media reveal, in ms.
        ceiling_ms: Option<u64>,
    },
    /// Advance when the stage's gate accepts a submission, after a pause.
    OnGate {
        /// Delay between gate acceptance and the next stage, in ms.
        pause_ms: u64,
    },
    /// Advance only on an explicit button press.
    OnButton {
        /// Label the front-end renders on the button.
        label: String,
    },
    /// Terminal stage: the story finishes here.
    End,
}

impl Advance {
    /// True for the terminal rule.
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// One step of the linear story sequence.
///
/// Stages are defined statically by the script; only their visibility and
/// activation state changes at runtime. A stage may carry text, a gate, a
/// media reference, or any combination — an empty `text` skips the
/// typewriter and counts as instantly complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique identifier of this stage.
    pub id: StageId,
    /// Surface the stage text types into.
    pub surface: SurfaceId,
    /// Text revealed by the typewriter. May contain literal newlines.
    pub text: String,
    /// Gate that must accept before this stage can advance, if any.
    #[serde(default)]
    pub gate: Option<GateId>,
    /// Media revealed after the text completes, if any.
    #[serde(default)]
    pub media: Option<MediaId>,
    /// Pause between activation and the typewriter starting, in ms.
    #[serde(default)]
    pub enter_delay_ms: u64,
    /// Pause between text completion and the media reveal, in ms.
    #[serde(default)]
    pub media_delay_ms: u64,
    /// Transition rule out of this stage.
    pub advance: Advance,
}

impl Stage {
    /// Create a stage with no gate, no media, and no extra delays.
    pub fn new(
        id: impl Into<StageId>,
        surface: impl Into<SurfaceId>,
        text: impl Into<String>,
        advance: Advance,
    ) -> Self {
        Self {
            id: id.into(),
            surface: surface.into(),
            text: text.into(),
            gate: None,
            media: None,
            enter_delay_ms: 0,
            media_delay_ms: 0,
            advance,
        }
    }

    /// Attach a gate reference.
    pub fn with_gate(mut self, gate: impl Into<GateId>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    /// Attach a media reference.
    pub fn with_media(mut self, media: impl Into<MediaId>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Set the pause between activation and the typewriter starting.
    pub fn with_enter_delay(mut self, ms: u64) -> Self {
        self.enter_delay_ms = ms;
        self
    }

    /// Set the pause between text completion and the media reveal.
    pub fn with_media_delay(mut self, ms: u64) -> Self {
        self.media_delay_ms = ms;
        self
    }
}

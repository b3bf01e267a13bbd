use serde::{Deserialize, Serialize};
use unveil_core::{GateId, MediaId, StageId};

/// What kind of playback event occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoryEventKind {
    // Stages
    /// A stage became the active frontier.
    StageActivated {
        /// The stage that was activated.
        stage: StageId,
    },
    /// A stage started revealing its text.
    TextStarted {
        /// The stage whose text started.
        stage: StageId,
    },
    /// A stage finished revealing its text and held for a beat.
    TextFinished {
        /// The stage whose text finished.
        stage: StageId,
    },
    /// The audience pressed a stage's advance button.
    ButtonPressed {
        /// The stage whose button was pressed.
        stage: StageId,
    },

    // Gates
    /// A gate accepted an answer and unlocked.
    GateAccepted {
        /// The gate that unlocked.
        gate: GateId,
    },
    /// A gate rejected an answer.
    GateRejected {
        /// The gate that rejected.
        gate: GateId,
    },
    /// A gate's hint was shown for the first time.
    HintRevealed {
        /// The gate whose hint was shown.
        gate: GateId,
    },

    // Media
    /// A hidden piece of media became visible.
    MediaRevealed {
        /// The revealed media.
        media: MediaId,
    },
    /// A video started or resumed playing.
    MediaStarted {
        /// The playing media.
        media: MediaId,
    },
    /// A video was paused.
    MediaPaused {
        /// The paused media.
        media: MediaId,
    },
    /// A video ran to its end.
    MediaFinished {
        /// The finished media.
        media: MediaId,
    },
    /// Automatic playback was requested but not permitted.
    AutoplayBlocked {
        /// The media that stayed still.
        media: MediaId,
    },

    // Ambient music
    /// The background music started.
    AmbientStarted,
    /// The background music stopped.
    AmbientStopped,
    /// The background music ducked under a video.
    AmbientDucked,
    /// The background music came back from a duck.
    AmbientResumed,
    /// The playlist moved to another track.
    AmbientTrackChanged {
        /// The new playlist position.
        index: usize,
    },

    // Lifecycle
    /// The final stage completed; the story is over.
    StoryFinished,
}

impl StoryEventKind {
    /// A short label naming the subsystem this event belongs to.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::StageActivated { .. } | Self::ButtonPressed { .. } => "stage",
            Self::TextStarted { .. } | Self::TextFinished { .. } => "text",
            Self::GateAccepted { .. } | Self::GateRejected { .. } | Self::HintRevealed { .. } => {
                "gate"
            }
            Self::MediaRevealed { .. }
            | Self::MediaStarted { .. }
            | Self::MediaPaused { .. }
            | Self::MediaFinished { .. }
            | Self::AutoplayBlocked { .. } => "media",
            Self::AmbientStarted
            | Self::AmbientStopped
            | Self::AmbientDucked
            | Self::AmbientResumed
            | Self::AmbientTrackChanged { .. } => "music",
            Self::StoryFinished => "story",
        }
    }

    /// Check whether this event is about a given stage.
    pub fn concerns_stage(&self, id: &StageId) -> bool {
        match self {
            Self::StageActivated { stage }
            | Self::TextStarted { stage }
            | Self::TextFinished { stage }
            | Self::ButtonPressed { stage } => stage == id,
            _ => false,
        }
    }
}

/// A record of something that happened during playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryEvent {
    /// Story time in milliseconds when this event occurred.
    pub at_ms: u64,
    /// The specific kind of event that occurred.
    pub kind: StoryEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl StoryEvent {
    /// Create a new playback event with the given time, kind, and description.
    pub fn new(at_ms: u64, kind: StoryEventKind, description: impl Into<String>) -> Self {
        Self {
            at_ms,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a playback run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<StoryEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: StoryEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[StoryEvent] {
        &self.events
    }

    /// Return the most recent `n` events, oldest first.
    pub fn latest(&self, n: usize) -> &[StoryEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    /// Return all events about the given stage.
    pub fn events_for_stage(&self, id: &StageId) -> Vec<&StoryEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.concerns_stage(id))
            .collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

//! Transcript storage and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::event::{StoryEvent, StoryEventKind};

/// A keepsake record of one playback run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Title of the story that was played.
    pub title: String,
    /// Wall-clock moment the transcript was taken.
    pub taken_at: DateTime<Utc>,
    /// Every event of the run, in order.
    pub events: Vec<StoryEvent>,
}

impl Transcript {
    /// Capture a transcript from a run's event log.
    pub fn from_events(title: impl Into<String>, events: &[StoryEvent]) -> Self {
        Self {
            title: title.into(),
            taken_at: Utc::now(),
            events: events.to_vec(),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the transcript holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Export the transcript as markdown, one section per stage.
    pub fn export_markdown(&self) -> String {
        let mut out = format!("# {} — Playback Transcript\n\n", self.title);
        out.push_str(&format!(
            "_Taken {}._\n\n",
            self.taken_at.format("%Y-%m-%d %H:%M UTC")
        ));
        for event in &self.events {
            match &event.kind {
                StoryEventKind::StageActivated { stage } => {
                    out.push_str(&format!("## {stage}\n\n"));
                    out.push_str(&format!("_Entered at {}._\n\n", fmt_at(event.at_ms)));
                }
                StoryEventKind::StoryFinished => {
                    out.push_str(&format!(
                        "*The End* ({}): {}\n",
                        fmt_at(event.at_ms),
                        event.description
                    ));
                }
                kind => {
                    out.push_str(&format!(
                        "**{}** ({}): {}\n\n",
                        kind.tag(),
                        fmt_at(event.at_ms),
                        event.description
                    ));
                }
            }
        }
        out
    }

    /// Export the transcript as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render a story-time offset like `t+4.600s`.
fn fmt_at(ms: u64) -> String {
    format!("t+{}.{:03}s", ms / 1_000, ms % 1_000)
}

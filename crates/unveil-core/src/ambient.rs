use serde::{Deserialize, Serialize};

/// Default ambient volume, on a 0-100 scale.
pub const DEFAULT_VOLUME: u8 = 30;

/// Default nominal track length used by the simulated playlist cursor.
pub const DEFAULT_TRACK_MS: u64 = 180_000;

/// The background-music playlist of a script.
///
/// Tracks are opaque external identifiers; the engine only moves a
/// circular cursor over them and models the play/pause lifecycle. An empty
/// playlist disables ambient audio entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientSpec {
    /// Ordered track identifiers, looped circularly.
    pub tracks: Vec<String>,
    /// Playback volume, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// Nominal per-track length driving the simulated cursor, in ms.
    #[serde(default = "default_track_ms")]
    pub track_ms: u64,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

fn default_track_ms() -> u64 {
    DEFAULT_TRACK_MS
}

impl Default for AmbientSpec {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            volume: DEFAULT_VOLUME,
            track_ms: DEFAULT_TRACK_MS,
        }
    }
}

impl AmbientSpec {
    /// Create a playlist from track identifiers.
    pub fn new(tracks: Vec<String>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    /// Set the volume.
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    /// Set the nominal track length.
    pub fn with_track_ms(mut self, track_ms: u64) -> Self {
        self.track_ms = track_ms;
        self
    }

    /// Number of tracks in the playlist.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

use unveil_core::AmbientSpec;

/// The looping background-music player.
///
/// The playlist is circular: when a track runs out the cursor moves to
/// the next one and playback continues, wrapping at the end. Ducking
/// suspends the music under a playing video without forgetting that the
/// listener wanted it on; a listener who stopped the music stays
/// stopped, and unducking never overrides that.
#[derive(Debug)]
pub struct AmbientPlayer {
    spec: AmbientSpec,
    cursor: usize,
    playing: bool,
    ducked: bool,
    position_ms: u64,
    autostart_armed: bool,
}

impl AmbientPlayer {
    /// Build a stopped player over `spec`, with autostart armed.
    pub fn new(spec: AmbientSpec) -> Self {
        Self {
            spec,
            cursor: 0,
            playing: false,
            ducked: false,
            position_ms: 0,
            autostart_armed: true,
        }
    }

    /// Start or stop the music by listener request. Starting always
    /// clears any duck. Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        if self.spec.is_empty() {
            return false;
        }
        self.playing = !self.playing;
        if self.playing {
            self.ducked = false;
        }
        self.playing
    }

    /// Suspend the music under a video. Returns `true` when this call
    /// changed anything.
    pub fn duck(&mut self) -> bool {
        if self.playing && !self.ducked {
            self.ducked = true;
            true
        } else {
            false
        }
    }

    /// Lift a duck. A listener stop is not a duck and stays in force.
    /// Returns `true` when this call changed anything.
    pub fn unduck(&mut self) -> bool {
        if self.playing && self.ducked {
            self.ducked = false;
            true
        } else {
            false
        }
    }

    /// React to the very first listener interaction: start the music
    /// once, unprompted. Later calls do nothing, whatever happened to
    /// the music in between. Returns `true` when the music started.
    pub fn on_first_interaction(&mut self) -> bool {
        if !self.autostart_armed {
            return false;
        }
        self.autostart_armed = false;
        if self.playing || self.spec.is_empty() {
            return false;
        }
        self.playing = true;
        self.ducked = false;
        true
    }

    /// Move playback forward by `delta_ms` while audible, wrapping the
    /// cursor past the end of the playlist. Returns the new cursor when
    /// it moved.
    pub fn advance(&mut self, delta_ms: u64) -> Option<usize> {
        if !self.is_audible() || self.spec.track_ms == 0 {
            return None;
        }
        self.position_ms += delta_ms;
        let mut moved = false;
        while self.position_ms >= self.spec.track_ms {
            self.position_ms -= self.spec.track_ms;
            self.cursor = (self.cursor + 1) % self.spec.len();
            moved = true;
        }
        if moved { Some(self.cursor) } else { None }
    }

    /// Whether the music is actually sounding right now.
    pub fn is_audible(&self) -> bool {
        self.playing && !self.ducked
    }

    /// Whether the listener wants the music on.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a video is holding the music down.
    pub fn is_ducked(&self) -> bool {
        self.ducked
    }

    /// Name of the track under the cursor.
    pub fn current_track(&self) -> Option<&str> {
        self.spec.tracks.get(self.cursor).map(String::as_str)
    }

    /// Position of the cursor in the playlist.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Position inside the current track, in milliseconds.
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Playback volume, 0 to 100.
    pub fn volume(&self) -> u8 {
        self.spec.volume
    }

    /// Number of tracks in the playlist.
    pub fn playlist_len(&self) -> usize {
        self.spec.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> AmbientPlayer {
        let spec = AmbientSpec::new(vec![
            "one.mp3".to_string(),
            "two.mp3".to_string(),
            "three.mp3".to_string(),
        ])
        .with_track_ms(1_000);
        AmbientPlayer::new(spec)
    }

    #[test]
    fn toggle_flips_and_clears_duck() {
        let mut p = player();
        assert!(p.toggle());
        assert!(p.duck());
        assert!(!p.toggle());
        // Starting again lifts the stale duck.
        assert!(p.toggle());
        assert!(!p.is_ducked());
    }

    #[test]
    fn duck_and_unduck_report_changes_only() {
        let mut p = player();
        // Ducking stopped music changes nothing.
        assert!(!p.duck());
        p.toggle();
        assert!(p.duck());
        assert!(!p.duck());
        assert!(p.unduck());
        assert!(!p.unduck());
    }

    #[test]
    fn unduck_never_restarts_stopped_music() {
        let mut p = player();
        p.toggle();
        p.duck();
        p.toggle();
        assert!(!p.unduck());
        assert!(!p.is_playing());
    }

    #[test]
    fn first_interaction_starts_once() {
        let mut p = player();
        assert!(p.on_first_interaction());
        assert!(p.is_playing());
        p.toggle();
        // Disarmed: a later interaction leaves the stop alone.
        assert!(!p.on_first_interaction());
        assert!(!p.is_playing());
    }

    #[test]
    fn first_interaction_with_music_already_on() {
        let mut p = player();
        p.toggle();
        assert!(!p.on_first_interaction());
        assert!(p.is_playing());
    }

    #[test]
    fn playlist_wraps_circularly() {
        let mut p = player();
        p.toggle();
        assert_eq!(p.advance(999), None);
        assert_eq!(p.advance(1), Some(1));
        assert_eq!(p.advance(1_000), Some(2));
        assert_eq!(p.advance(1_000), Some(0));
        assert_eq!(p.current_track(), Some("one.mp3"));
    }

    #[test]
    fn long_delta_can_skip_tracks() {
        let mut p = player();
        p.toggle();
        assert_eq!(p.advance(2_500), Some(2));
        assert_eq!(p.position_ms(), 500);
    }

    #[test]
    fn ducked_music_does_not_advance() {
        let mut p = player();
        p.toggle();
        p.duck();
        assert_eq!(p.advance(5_000), None);
        assert_eq!(p.position_ms(), 0);
    }

    #[test]
    fn empty_playlist_refuses_everything() {
        let mut p = AmbientPlayer::new(AmbientSpec::new(Vec::new()));
        assert!(!p.toggle());
        assert!(!p.on_first_interaction());
        assert_eq!(p.advance(10_000), None);
        assert_eq!(p.current_track(), None);
    }
}

use unveil_core::{MediaId, MediaKind, MediaSpec};

/// Where a piece of media is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPhase {
    /// Not yet revealed; invisible to the audience.
    Hidden,
    /// Revealed and waiting. For a photo this is the final phase.
    Ready,
    /// A video in playback.
    Playing,
    /// A video halted mid-playback.
    Paused,
    /// A video that ran to the end of its duration.
    Ended,
}

/// Live state of one piece of media during playback.
#[derive(Debug)]
pub struct MediaRuntime {
    spec: MediaSpec,
    phase: MediaPhase,
    position_ms: u64,
}

impl MediaRuntime {
    fn new(spec: MediaSpec) -> Self {
        Self {
            spec,
            phase: MediaPhase::Hidden,
            position_ms: 0,
        }
    }

    /// The underlying media definition.
    pub fn spec(&self) -> &MediaSpec {
        &self.spec
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> MediaPhase {
        self.phase
    }

    /// Playback position in milliseconds.
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Playback progress in `0.0..=1.0`, when a duration is known.
    pub fn progress(&self) -> Option<f64> {
        let duration = self.spec.duration_ms?;
        if duration == 0 {
            return None;
        }
        Some(self.position_ms as f64 / duration as f64)
    }
}

/// All media of a story, keyed by id, in script order.
#[derive(Debug, Default)]
pub struct MediaBoard {
    items: Vec<MediaRuntime>,
}

impl MediaBoard {
    /// Build a board with every item hidden.
    pub fn new(specs: &[MediaSpec]) -> Self {
        Self {
            items: specs.iter().cloned().map(MediaRuntime::new).collect(),
        }
    }

    /// Look up one item.
    pub fn get(&self, id: &MediaId) -> Option<&MediaRuntime> {
        self.items.iter().find(|item| &item.spec.id == id)
    }

    fn get_mut(&mut self, id: &MediaId) -> Option<&mut MediaRuntime> {
        self.items.iter_mut().find(|item| &item.spec.id == id)
    }

    /// Make a hidden item visible. Returns `true` only on the
    /// hidden-to-ready transition; revealing twice is a no-op.
    pub fn reveal(&mut self, id: &MediaId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.phase == MediaPhase::Hidden => {
                item.phase = MediaPhase::Ready;
                true
            }
            _ => false,
        }
    }

    /// Start or resume video playback. Photos and unrevealed or ended
    /// items ignore the request; returns `true` when playback started.
    pub fn play(&mut self, id: &MediaId) -> bool {
        match self.get_mut(id) {
            Some(item)
                if item.spec.kind == MediaKind::Video
                    && matches!(item.phase, MediaPhase::Ready | MediaPhase::Paused) =>
            {
                item.phase = MediaPhase::Playing;
                true
            }
            _ => false,
        }
    }

    /// Halt video playback. Returns `true` when something was playing.
    pub fn pause(&mut self, id: &MediaId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.phase == MediaPhase::Playing => {
                item.phase = MediaPhase::Paused;
                true
            }
            _ => false,
        }
    }

    /// Move playing videos forward by `delta_ms` and return the ids of
    /// those that just ran out, in script order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<MediaId> {
        let mut ended = Vec::new();
        for item in &mut self.items {
            if item.phase != MediaPhase::Playing {
                continue;
            }
            item.position_ms += delta_ms;
            if let Some(duration) = item.spec.duration_ms {
                if item.position_ms >= duration {
                    item.position_ms = duration;
                    item.phase = MediaPhase::Ended;
                    ended.push(item.spec.id.clone());
                }
            }
        }
        ended
    }

    /// Pause everything still playing and return the ids that were.
    pub fn stop_all(&mut self) -> Vec<MediaId> {
        let mut stopped = Vec::new();
        for item in &mut self.items {
            if item.phase == MediaPhase::Playing {
                item.phase = MediaPhase::Paused;
                stopped.push(item.spec.id.clone());
            }
        }
        stopped
    }

    /// Whether any video is currently playing.
    pub fn any_playing(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.phase == MediaPhase::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> MediaBoard {
        MediaBoard::new(&[
            MediaSpec::video("film", "film.mp4", 1_000),
            MediaSpec::photo("snap", "snap.jpg"),
        ])
    }

    fn film() -> MediaId {
        MediaId::new("film")
    }

    #[test]
    fn reveal_is_one_way_and_idempotent() {
        let mut b = board();
        assert!(b.reveal(&film()));
        assert!(!b.reveal(&film()));
        assert_eq!(b.get(&film()).map(MediaRuntime::phase), Some(MediaPhase::Ready));
    }

    #[test]
    fn hidden_video_refuses_to_play() {
        let mut b = board();
        assert!(!b.play(&film()));
        b.reveal(&film());
        assert!(b.play(&film()));
    }

    #[test]
    fn photos_never_play() {
        let mut b = board();
        let snap = MediaId::new("snap");
        b.reveal(&snap);
        assert!(!b.play(&snap));
        assert_eq!(b.get(&snap).map(MediaRuntime::phase), Some(MediaPhase::Ready));
    }

    #[test]
    fn pause_and_resume_keep_position() {
        let mut b = board();
        b.reveal(&film());
        b.play(&film());
        b.advance(400);
        assert!(b.pause(&film()));
        b.advance(10_000);
        assert_eq!(b.get(&film()).map(MediaRuntime::position_ms), Some(400));
        assert!(b.play(&film()));
    }

    #[test]
    fn playback_ends_at_duration() {
        let mut b = board();
        b.reveal(&film());
        b.play(&film());
        assert!(b.advance(999).is_empty());
        assert_eq!(b.advance(500), vec![film()]);
        let item = b.get(&film()).map(|item| (item.phase(), item.position_ms()));
        assert_eq!(item, Some((MediaPhase::Ended, 1_000)));
        // Ended is terminal.
        let mut b2 = b;
        assert!(!b2.play(&film()));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut b = board();
        let ghost = MediaId::new("ghost");
        assert!(!b.reveal(&ghost));
        assert!(!b.play(&ghost));
        assert!(!b.pause(&ghost));
        assert!(b.get(&ghost).is_none());
    }

    #[test]
    fn stop_all_pauses_only_the_playing() {
        let mut b = MediaBoard::new(&[
            MediaSpec::video("a", "a.mp4", 5_000),
            MediaSpec::video("b", "b.mp4", 5_000),
        ]);
        b.reveal(&MediaId::new("a"));
        b.reveal(&MediaId::new("b"));
        b.play(&MediaId::new("a"));
        assert_eq!(b.stop_all(), vec![MediaId::new("a")]);
        assert!(!b.any_playing());
    }

    #[test]
    fn progress_tracks_position() {
        let mut b = board();
        b.reveal(&film());
        b.play(&film());
        b.advance(250);
        let progress = b.get(&film()).and_then(MediaRuntime::progress);
        assert_eq!(progress, Some(0.25));
    }
}

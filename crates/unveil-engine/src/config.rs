//! Pacing and presentation knobs for a playback run.

use crate::profile::DeviceProfile;

/// Default delay between revealed characters, in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 120;

/// Relaxed delay between revealed characters, for modest machines.
pub const RELAXED_SPEED_MS: u64 = 180;

/// Character delay under reduced motion, in milliseconds.
pub const REDUCED_MOTION_SPEED_MS: u64 = 10;

/// Default hold between the last character and the finished signal.
pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 300;

/// Default delay before the first stage activates.
pub const DEFAULT_START_DELAY_MS: u64 = 1_000;

/// Default event log capacity.
pub const DEFAULT_MAX_EVENTS: usize = 256;

/// How eagerly media should be fetched before it is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preload {
    /// Fetch sizing and duration metadata up front.
    #[default]
    Metadata,
    /// Fetch nothing until the item is revealed.
    None,
}

/// Configuration for a playback run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay between revealed characters, in milliseconds.
    pub speed_ms: u64,
    /// Tone animation down: instant scrolls and near-instant text.
    pub reduced_motion: bool,
    /// Start videos as soon as they are revealed.
    pub autoplay: bool,
    /// Whether the host permits unattended playback at all.
    pub autoplay_allowed: bool,
    /// Start the background music on the first audience interaction.
    pub ambient_autostart: bool,
    /// Delay before the first stage activates, in milliseconds.
    pub start_delay_ms: u64,
    /// Hold between the last character and the finished signal.
    pub completion_delay_ms: u64,
    /// How eagerly media is fetched before reveal.
    pub preload: Preload,
    /// Event log capacity (0 = unlimited).
    pub max_events: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            reduced_motion: false,
            autoplay: false,
            autoplay_allowed: true,
            ambient_autostart: true,
            start_delay_ms: DEFAULT_START_DELAY_MS,
            completion_delay_ms: DEFAULT_COMPLETION_DELAY_MS,
            preload: Preload::default(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl EngineConfig {
    /// Set the delay between revealed characters.
    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Turn reduced motion on or off.
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Ask videos to start as soon as they are revealed.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Permit or forbid unattended playback.
    pub fn with_autoplay_allowed(mut self, allowed: bool) -> Self {
        self.autoplay_allowed = allowed;
        self
    }

    /// Let the first audience interaction start the music, or keep it
    /// quiet until asked.
    pub fn with_ambient_autostart(mut self, autostart: bool) -> Self {
        self.ambient_autostart = autostart;
        self
    }

    /// Set the delay before the first stage activates.
    pub fn with_start_delay(mut self, start_delay_ms: u64) -> Self {
        self.start_delay_ms = start_delay_ms;
        self
    }

    /// Set the media preload policy.
    pub fn with_preload(mut self, preload: Preload) -> Self {
        self.preload = preload;
        self
    }

    /// Set the event log capacity (0 = unlimited).
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    /// Fold a device profile in: a low-end machine gets relaxed pacing
    /// and lazy media, and reduced motion is honored from either side.
    pub fn with_profile(mut self, profile: &DeviceProfile) -> Self {
        if profile.low_end {
            self.speed_ms = self.speed_ms.max(RELAXED_SPEED_MS);
            self.preload = Preload::None;
        }
        self.reduced_motion = self.reduced_motion || profile.reduced_motion;
        self
    }

    /// The effective delay between revealed characters.
    pub fn type_interval_ms(&self) -> u64 {
        if self.reduced_motion {
            REDUCED_MOTION_SPEED_MS
        } else {
            self.speed_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.speed_ms, 120);
        assert_eq!(cfg.completion_delay_ms, 300);
        assert_eq!(cfg.start_delay_ms, 1_000);
        assert!(!cfg.autoplay);
        assert!(cfg.autoplay_allowed);
        assert!(cfg.ambient_autostart);
        assert_eq!(cfg.preload, Preload::Metadata);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_speed(60)
            .with_autoplay(true)
            .with_ambient_autostart(false)
            .with_start_delay(0)
            .with_max_events(16);
        assert_eq!(cfg.speed_ms, 60);
        assert!(cfg.autoplay);
        assert!(!cfg.ambient_autostart);
        assert_eq!(cfg.start_delay_ms, 0);
        assert_eq!(cfg.max_events, 16);
    }

    #[test]
    fn reduced_motion_overrides_speed() {
        let cfg = EngineConfig::default().with_reduced_motion(true);
        assert_eq!(cfg.type_interval_ms(), REDUCED_MOTION_SPEED_MS);
        let plain = EngineConfig::default().with_speed(200);
        assert_eq!(plain.type_interval_ms(), 200);
    }

    #[test]
    fn low_end_profile_relaxes_pacing() {
        let profile = DeviceProfile {
            reduced_motion: false,
            low_end: true,
        };
        let cfg = EngineConfig::default().with_profile(&profile);
        assert_eq!(cfg.speed_ms, RELAXED_SPEED_MS);
        assert_eq!(cfg.preload, Preload::None);
        assert!(!cfg.reduced_motion);
    }

    #[test]
    fn low_end_profile_never_slows_a_slower_choice() {
        let profile = DeviceProfile {
            reduced_motion: false,
            low_end: true,
        };
        let cfg = EngineConfig::default().with_speed(300).with_profile(&profile);
        assert_eq!(cfg.speed_ms, 300);
    }

    #[test]
    fn reduced_motion_honored_from_either_side() {
        let profile = DeviceProfile {
            reduced_motion: true,
            low_end: false,
        };
        let cfg = EngineConfig::default().with_profile(&profile);
        assert!(cfg.reduced_motion);
        let cfg = EngineConfig::default()
            .with_reduced_motion(true)
            .with_profile(&DeviceProfile::default());
        assert!(cfg.reduced_motion);
    }
}

//! Deterministic playback engine for Unveil.
//!
//! Drives a [`unveil_core::Script`] through its reveal: activates stages in
//! order, types text character by character, judges gate submissions, walks
//! media through its lifecycle, and loops the background music. Time only
//! moves when the host calls [`Orchestrator::advance`], so identical inputs
//! replay identical stories — there is no wall clock and no randomness
//! anywhere in the crate.

/// The background-music player: circular playlist, ducking, autostart.
pub mod ambient;
/// The story clock that only moves when advanced.
pub mod clock;
/// Pacing and presentation configuration.
pub mod config;
/// Error types for the engine crate.
pub mod error;
/// Playback event types and the event log.
pub mod event;
/// Live gate state: attempts, hints, input echo.
pub mod gate;
/// Live media state: reveal, playback, simulated progress.
pub mod media;
/// Top-level playback orchestrator.
pub mod orchestrator;
/// Machine and operator presentation profile.
pub mod profile;
/// Text buffers that stages type into.
pub mod surface;
/// The single-lane timer registry behind all scheduled actions.
pub mod timer;
/// Transcript capture and export.
pub mod transcript;
/// The character-by-character text reveal.
pub mod typewriter;

/// Re-export of [`ambient::AmbientPlayer`].
pub use ambient::AmbientPlayer;
/// Re-export of [`clock::StoryClock`].
pub use clock::StoryClock;
/// Re-exports of [`config::EngineConfig`] and [`config::Preload`].
pub use config::{EngineConfig, Preload};
/// Re-exports of [`error::EngineError`] and [`error::EngineResult`].
pub use error::{EngineError, EngineResult};
/// Re-exports of [`event::EventLog`], [`event::StoryEvent`], and [`event::StoryEventKind`].
pub use event::{EventLog, StoryEvent, StoryEventKind};
/// Re-exports of [`gate::GateOutcome`] and [`gate::GateRuntime`].
pub use gate::{GateOutcome, GateRuntime};
/// Re-exports of [`media::MediaPhase`] and [`media::MediaRuntime`].
pub use media::{MediaPhase, MediaRuntime};
/// Re-exports of [`orchestrator::Orchestrator`] and [`orchestrator::StageStatus`].
pub use orchestrator::{Orchestrator, StageStatus};
/// Re-export of [`profile::DeviceProfile`].
pub use profile::DeviceProfile;
/// Re-export of [`surface::Surface`].
pub use surface::Surface;
/// Re-export of [`transcript::Transcript`].
pub use transcript::Transcript;

//! Core types for Unveil: the script model a reveal story is authored in.
//!
//! This crate defines the data the engine runs: a linear sequence of
//! [`Stage`]s plus the gates, media items, and ambient playlist they
//! reference. It is independent of any runtime — you can construct a
//! [`Script`] programmatically, load one from JSON, or start from the
//! built-in [`demo`] variants.

/// The background-music playlist.
pub mod ambient;
/// Built-in demo scripts.
pub mod demo;
/// Error types used throughout the crate.
pub mod error;
/// Password gates and their matching rules.
pub mod gate;
/// Media items referenced by stages.
pub mod media;
/// The script container, metadata, and validation.
pub mod script;
/// Stages, surfaces, and transition rules.
pub mod stage;

/// Re-export of [`ambient::AmbientSpec`].
pub use ambient::AmbientSpec;
/// Re-exports of [`error::ScriptError`] and [`error::ScriptResult`].
pub use error::{ScriptError, ScriptResult};
/// Re-exports of gate types.
pub use gate::{GateId, GateSpec, MatchMode};
/// Re-exports of media types.
pub use media::{MediaId, MediaKind, MediaSpec};
/// Re-exports of the script container and validation types.
pub use script::{Script, ScriptIssue, ScriptMeta, Severity};
/// Re-exports of stage types.
pub use stage::{Advance, Stage, StageId, SurfaceId};

//! Terminal player for Unveil reveal scripts.
//!
//! A single ratatui screen that drives the playback engine in real time:
//! the story types itself out, gates take answers in a masked input row,
//! media items show up as widgets in the log, and a status bar tracks
//! the background music.

pub mod app;
pub mod shared;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run;

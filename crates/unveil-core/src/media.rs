use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a media item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub String);

impl MediaId {
    /// Create a media identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MediaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of media an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Playable media with a nominal duration.
    Video,
    /// Still media. Photos never report ended.
    Photo,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Photo => write!(f, "photo"),
        }
    }
}

/// A media item referenced by stages.
///
/// The engine never decodes media. `source` is a path owned by whatever
/// presents the story; the engine only tracks playback state against the
/// nominal `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSpec {
    /// Unique identifier of this media item.
    pub id: MediaId,
    /// Whether this is a video or a photo.
    pub kind: MediaKind,
    /// Presentation-owned source path.
    pub source: String,
    /// Nominal playback length for videos, in ms.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Optional caption rendered alongside the media.
    #[serde(default)]
    pub caption: Option<String>,
}

impl MediaSpec {
    /// Create a video with a nominal duration.
    pub fn video(id: impl Into<MediaId>, source: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Video,
            source: source.into(),
            duration_ms: Some(duration_ms),
            caption: None,
        }
    }

    /// Create a photo.
    pub fn photo(id: impl Into<MediaId>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Photo,
            source: source.into(),
            duration_ms: None,
            caption: None,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Whether this item can ever report ended on its own.
    ///
    /// Photos never end; a video without a duration has no simulated end
    /// either, so a stage waiting on it needs a ceiling.
    pub fn emits_ended(&self) -> bool {
        self.kind == MediaKind::Video && self.duration_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_constructor_sets_duration() {
        let clip = MediaSpec::video("clip", "media/clip.mp4", 12_000);
        assert_eq!(clip.kind, MediaKind::Video);
        assert_eq!(clip.duration_ms, Some(12_000));
        assert!(clip.emits_ended());
    }

    #[test]
    fn photo_never_emits_ended() {
        let photo = MediaSpec::photo("pic", "media/pic.jpg").with_caption("Us, day one");
        assert_eq!(photo.kind, MediaKind::Photo);
        assert!(photo.duration_ms.is_none());
        assert!(!photo.emits_ended());
        assert_eq!(photo.caption.as_deref(), Some("Us, day one"));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Photo).unwrap();
        assert_eq!(json, "\"photo\"");
    }
}

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the engine.
///
/// Runtime playback never errors — missing references degrade silently —
/// so this covers the serialization edges only.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A transcript could not be serialized.
    #[error("transcript JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

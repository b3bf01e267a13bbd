/// Alias for `Result<T, ScriptError>`.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur when loading or serializing scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script JSON could not be read or written.
    #[error("script JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested built-in variant does not exist.
    #[error("unknown built-in variant: \"{0}\"")]
    UnknownVariant(String),
}

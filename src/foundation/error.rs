use std::path::PathBuf;

/// Crate-wide result alias.
pub type DanmakuResult<T> = Result<T, DanmakuError>;

/// Errors surfaced while setting up or driving the overlay renderer.
///
/// Font failures are the user-facing setup errors; everything a frame does after construction is
/// expected to succeed given valid surfaces.
#[derive(thiserror::Error, Debug)]
pub enum DanmakuError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to open font file '{}': {source}", .path.display())]
    FontOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized font file format '{}'", .path.display())]
    FontFormat { path: PathBuf },

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DanmakuError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors caused by the configured font resource.
    pub fn is_font_error(&self) -> bool {
        matches!(self, Self::FontOpen { .. } | Self::FontFormat { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

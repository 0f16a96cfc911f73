use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("A thumbnail request is already in progress")]
    AlreadyActive,

    #[error("Cannot read a frame from {locator}: {reason}")]
    SourceUnreadable { locator: String, reason: String },

    #[error("Failed to encode thumbnail: {0}")]
    EncodingFailed(String),

    #[error("Failed to write thumbnail to {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    BadArgument(String),
}

impl ThumbnailError {
    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "already_active",
            Self::SourceUnreadable { .. } => "source_unreadable",
            Self::EncodingFailed(_) => "encoding_failed",
            Self::WriteFailed { .. } => "write_failed",
            Self::BadArgument(_) => "bad_argument",
        }
    }

    pub(crate) fn unreadable(locator: impl ToString, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            locator: locator.to_string(),
            reason: reason.into(),
        }
    }
}

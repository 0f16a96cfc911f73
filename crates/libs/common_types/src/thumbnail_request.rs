use crate::ImageFormat;
use bon::Builder;
use std::collections::BTreeMap;

pub const DEFAULT_QUALITY: i32 = 75;

/// A single thumbnail generation request.
///
/// Built once through [`ThumbnailRequest::builder`] and never mutated afterwards;
/// the pipeline only reads from it.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ThumbnailRequest {
    /// Local path, `file://` URI or remote URL of the video.
    #[builder(into)]
    source: String,
    #[builder(default)]
    format: ImageFormat,
    /// Bound on the longer side of the thumbnail. `0` keeps the frame size.
    #[builder(default)]
    max_dimension: u32,
    /// Codec quality, handed to the encoder as-is.
    #[builder(default = DEFAULT_QUALITY)]
    quality: i32,
    /// Output file or directory, only used when writing to disk.
    #[builder(into)]
    destination: Option<String>,
    /// Extra HTTP headers for remote sources.
    #[builder(default)]
    headers: BTreeMap<String, String>,
}

impl ThumbnailRequest {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub const fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    #[must_use]
    pub const fn quality(&self) -> i32 {
        self.quality
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let request = ThumbnailRequest::builder().source("/a/b/clip.mp4").build();

        assert_eq!(request.source(), "/a/b/clip.mp4");
        assert_eq!(request.format(), ImageFormat::Jpeg);
        assert_eq!(request.max_dimension(), 0);
        assert_eq!(request.quality(), DEFAULT_QUALITY);
        assert_eq!(request.destination(), None);
        assert!(request.headers().is_empty());
    }
}

use crate::{RawFrame, ThumbnailError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where a video is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// A filesystem path, either given directly or as a `file://` URI.
    Local(PathBuf),
    /// Anything with a non-`file` scheme, opened through the network stack.
    Remote {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl SourceLocator {
    /// Classifies a locator string. Headers are only kept for remote sources.
    #[must_use]
    pub fn classify(locator: &str, headers: &BTreeMap<String, String>) -> Self {
        if locator.starts_with("file://") {
            let path = Url::parse(locator)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(&locator["file://".len()..]));
            return Self::Local(path);
        }
        if locator.contains("://") {
            return Self::Remote {
                url: locator.to_owned(),
                headers: headers.clone(),
            };
        }
        Self::Local(PathBuf::from(locator))
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote { url, .. } => f.write_str(url),
        }
    }
}

/// A video decoding backend: given a source, produce one representative frame.
///
/// No particular timestamp is requested, implementations return whichever frame
/// is cheapest to reach (usually the first one). Any decoder resources must be
/// released before `extract` returns, whether it succeeds or not.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn extract(&self, locator: &SourceLocator) -> Result<RawFrame, ThumbnailError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn absolute_paths_are_local() {
        let locator = SourceLocator::classify("/a/b/clip.mp4", &BTreeMap::new());
        assert_eq!(locator, SourceLocator::Local(PathBuf::from("/a/b/clip.mp4")));
    }

    #[test]
    fn file_uris_are_decoded_to_paths() {
        let locator = SourceLocator::classify("file:///a/my%20clip.mp4", &BTreeMap::new());
        let SourceLocator::Local(path) = locator else {
            panic!("expected a local source");
        };
        assert_eq!(path, Path::new("/a/my clip.mp4"));
    }

    #[test]
    fn urls_are_remote_and_keep_headers() {
        let headers = BTreeMap::from([("Authorization".to_owned(), "Bearer x".to_owned())]);
        let locator = SourceLocator::classify("https://cdn.example.com/v.mp4", &headers);

        assert!(locator.is_remote());
        assert_eq!(
            locator,
            SourceLocator::Remote {
                url: "https://cdn.example.com/v.mp4".to_owned(),
                headers,
            }
        );
    }
}

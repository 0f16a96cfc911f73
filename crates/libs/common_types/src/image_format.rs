use serde::{Deserialize, Serialize};
use std::fmt;

/// Output codec of a thumbnail.
///
/// The numeric codes are the ones used on the wire by the host bridge
/// (`0` = JPEG, `1` = PNG, `2` = WEBP). Any other code falls back to JPEG.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Png,
            2 => Self::Webp,
            _ => Self::Jpeg,
        }
    }

    /// The canonical file extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Webp => "WEBP",
        };
        f.write_str(name)
    }
}

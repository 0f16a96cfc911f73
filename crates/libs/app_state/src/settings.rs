use common_types::{DEFAULT_QUALITY, ImageFormat};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    #[serde(default)]
    pub ffmpeg: FfmpegSettings,
    #[serde(default)]
    pub thumbnails: ThumbnailSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// A `tracing` filter directive, e.g. `info` or `generate_thumbnails=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// How the `ffmpeg` binary is invoked for frame extraction.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FfmpegSettings {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Value passed to `-loglevel`.
    pub log_level: String,
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
            log_level: "error".to_owned(),
        }
    }
}

/// Configuration for thumbnail generation.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub resize_filter: ResizeFilter,
    /// Used by the one-shot CLI when no format is given.
    pub default_format: ImageFormat,
    pub default_quality: i32,
    /// `0` keeps the frame size.
    pub default_max_dimension: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            resize_filter: ResizeFilter::default(),
            default_format: ImageFormat::Jpeg,
            default_quality: DEFAULT_QUALITY,
            default_max_dimension: 0,
        }
    }
}

/// Resampling filter used when scaling a frame.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Bilinear,
    CatmullRom,
    #[default]
    Lanczos3,
}

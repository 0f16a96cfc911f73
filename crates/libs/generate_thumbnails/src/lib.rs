#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

//! # Thumbnail Generation Crate
//!
//! Produces a single still thumbnail from a video: one frame is extracted, scaled so its
//! longer side fits a bound, and encoded as JPEG, PNG or WEBP. The result is either kept in
//! memory or written next to the source (or into a chosen directory).
//!
//! ## Stages
//!
//! - [`FrameSource`]: decoding backend. [`FfmpegFrameSource`] runs `ffmpeg` and reads one
//!   frame back as PNG.
//! - [`scale_frame`]: aspect-preserving resize with `fast_image_resize`.
//! - [`encode_frame`]: JPEG/PNG through `image`, lossy WEBP through `libwebp`.
//! - [`resolve_output_path`] / [`write_thumbnail`]: output materialization.
//!
//! [`generate_thumbnail_data`] and [`generate_thumbnail_file`] chain the stages.
//!
//! ## Requirements
//!
//! - **`FFmpeg`**: must be installed and accessible in the system's `PATH`, or configured
//!   through `ffmpeg.binary`.
//!
//! ## Example
//!
//! ```no_run
//! use app_state::{FfmpegSettings, ResizeFilter};
//! use common_types::{ImageFormat, ThumbnailRequest};
//! use generate_thumbnails::{FfmpegFrameSource, generate_thumbnail_file};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), generate_thumbnails::ThumbnailError> {
//!     let frames = FfmpegFrameSource::new(&FfmpegSettings::default());
//!     let request = ThumbnailRequest::builder()
//!         .source("/videos/clip.mp4")
//!         .format(ImageFormat::Webp)
//!         .max_dimension(256)
//!         .quality(70)
//!         .build();
//!
//!     let path = generate_thumbnail_file(&frames, &request, ResizeFilter::Lanczos3).await?;
//!     println!("Thumbnail written to {path}");
//!     Ok(())
//! }
//! ```

mod encode;
mod error;
mod ffmpeg;
mod frame;
mod output;
mod pipeline;
mod scale;
mod source;

pub use encode::encode_frame;
pub use error::ThumbnailError;
pub use ffmpeg::FfmpegFrameSource;
pub use frame::{EncodedImage, RawFrame};
pub use output::{default_output_path, resolve_output_path, to_bytes, write_thumbnail};
pub use pipeline::{generate_thumbnail_data, generate_thumbnail_file};
pub use scale::{MAX_THUMBNAIL_PIXELS, scale_frame, target_dimensions};
pub use source::{FrameSource, SourceLocator};

use crate::{RawFrame, ThumbnailError};
use app_state::ResizeFilter;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use tracing::debug;

/// Largest thumbnail, in pixels, that will be allocated (a 16384x16384 RGBA buffer is 1 GiB).
pub const MAX_THUMBNAIL_PIXELS: u64 = 16_384 * 16_384;

/// Computes the thumbnail size for a `width`x`height` frame whose longer side is bound by
/// `max_dimension`. Both sides are scaled by the same factor, which may exceed 1.
/// A `max_dimension` of `0` keeps the original size.
#[must_use]
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_dimension == 0 || longest == 0 {
        return (width, height);
    }
    let scale = f64::from(max_dimension) / f64::from(longest);
    (
        (scale * f64::from(width)).round() as u32,
        (scale * f64::from(height)).round() as u32,
    )
}

/// Resamples `frame` so its longer side equals `max_dimension`.
///
/// If rounding collapses a side to zero, an empty frame of that size is returned and left
/// for the encoder to reject. Targets larger than [`MAX_THUMBNAIL_PIXELS`] fail with
/// [`ThumbnailError::EncodingFailed`] before anything is allocated.
pub fn scale_frame(
    frame: RawFrame,
    max_dimension: u32,
    filter: ResizeFilter,
) -> Result<RawFrame, ThumbnailError> {
    let (orig_w, orig_h) = (frame.width(), frame.height());
    let (target_w, target_h) = target_dimensions(orig_w, orig_h, max_dimension);
    debug!("original w:{orig_w}, h:{orig_h} => {target_w}, {target_h}");

    if (target_w, target_h) == (orig_w, orig_h) {
        return Ok(frame);
    }
    if target_w == 0 || target_h == 0 {
        return Ok(RawFrame::new(target_w, target_h, Vec::new()));
    }
    let pixels = u64::from(target_w)
        .checked_mul(u64::from(target_h))
        .filter(|&pixels| pixels <= MAX_THUMBNAIL_PIXELS)
        .ok_or_else(|| {
            ThumbnailError::EncodingFailed(format!(
                "thumbnail of {target_w}x{target_h} exceeds {MAX_THUMBNAIL_PIXELS} pixels"
            ))
        })?;
    debug!("Allocating {} bytes for the scaled frame", pixels * 4);

    let src_image = Image::from_vec_u8(orig_w, orig_h, frame.into_pixels(), PixelType::U8x4)
        .map_err(|e| ThumbnailError::EncodingFailed(format!("invalid source frame: {e}")))?;
    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter_type(filter)));
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ThumbnailError::EncodingFailed(format!("resize failed: {e}")))?;

    Ok(RawFrame::new(target_w, target_h, dst_image.into_vec()))
}

const fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Bilinear => FilterType::Bilinear,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

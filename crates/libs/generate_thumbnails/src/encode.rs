use crate::{EncodedImage, RawFrame, ThumbnailError};
use common_types::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

/// Encodes a frame with the codec for `format`.
///
/// `quality` is handed to lossy codecs without range checks, so out-of-range values behave
/// however that codec treats them. PNG ignores it.
pub fn encode_frame(
    frame: RawFrame,
    format: ImageFormat,
    quality: i32,
) -> Result<EncodedImage, ThumbnailError> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(ThumbnailError::EncodingFailed(format!(
            "cannot encode a {width}x{height} frame as {format}"
        )));
    }
    let image = RgbaImage::from_raw(width, height, frame.into_pixels()).ok_or_else(|| {
        ThumbnailError::EncodingFailed(format!(
            "pixel buffer does not match a {width}x{height} RGBA frame"
        ))
    })?;

    let bytes = match format {
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Png => encode_png(&image),
        ImageFormat::Webp => encode_webp(&image, quality),
    }?;
    debug!("Encoded {width}x{height} {format} thumbnail: {} bytes", bytes.len());

    Ok(EncodedImage::new(bytes, format))
}

fn encode_jpeg(image: RgbaImage, quality: i32) -> Result<Vec<u8>, ThumbnailError> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
    let quality = u8::try_from(quality).unwrap_or(if quality < 0 { 0 } else { u8::MAX });

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&rgb)
        .map_err(|e| ThumbnailError::EncodingFailed(e.to_string()))?;
    Ok(bytes)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ThumbnailError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ThumbnailError::EncodingFailed(e.to_string()))?;
    Ok(bytes)
}

fn encode_webp(image: &RgbaImage, quality: i32) -> Result<Vec<u8>, ThumbnailError> {
    let encoded = webp::Encoder::from_rgba(image.as_raw(), image.width(), image.height())
        .encode_simple(false, quality as f32)
        .map_err(|e| ThumbnailError::EncodingFailed(format!("webp encoder error: {e:?}")))?;
    Ok(encoded.to_vec())
}

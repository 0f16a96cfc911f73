use crate::encode::encode_frame;
use crate::output::{resolve_output_path, write_thumbnail};
use crate::scale::scale_frame;
use crate::{EncodedImage, FrameSource, SourceLocator, ThumbnailError};
use app_state::ResizeFilter;
use common_types::ThumbnailRequest;
use tokio::task::spawn_blocking;
use tracing::debug;

/// Extracts a frame for `request`, scales it and encodes it.
///
/// Resampling and encoding run on the blocking thread pool.
pub async fn generate_thumbnail_data(
    frames: &dyn FrameSource,
    request: &ThumbnailRequest,
    resize_filter: ResizeFilter,
) -> Result<EncodedImage, ThumbnailError> {
    debug!(
        "generate_thumbnail_data( format:{}, max_dimension:{}, quality:{} )",
        request.format(),
        request.max_dimension(),
        request.quality()
    );
    let locator = SourceLocator::classify(request.source(), request.headers());
    let frame = frames.extract(&locator).await?;

    let format = request.format();
    let max_dimension = request.max_dimension();
    let quality = request.quality();
    spawn_blocking(move || {
        let frame = scale_frame(frame, max_dimension, resize_filter)?;
        encode_frame(frame, format, quality)
    })
    .await
    .map_err(|e| ThumbnailError::EncodingFailed(format!("encoder task failed: {e}")))?
}

/// Generates a thumbnail and writes it to disk, returning the final path.
pub async fn generate_thumbnail_file(
    frames: &dyn FrameSource,
    request: &ThumbnailRequest,
    resize_filter: ResizeFilter,
) -> Result<String, ThumbnailError> {
    let path = resolve_output_path(request.source(), request.destination(), request.format())?;
    let encoded = generate_thumbnail_data(frames, request, resize_filter).await?;
    write_thumbnail(encoded, &path).await?;
    Ok(path)
}

use crate::{EncodedImage, ThumbnailError};
use common_types::ImageFormat;
use tokio::fs;
use tracing::debug;

const SEPARATOR: char = '/';

/// Returns the encoded bytes as-is.
#[must_use]
pub fn to_bytes(encoded: EncodedImage) -> Vec<u8> {
    encoded.into_bytes()
}

/// The source locator with its extension swapped for the one of `format`,
/// e.g. `/a/b/clip.mp4` -> `/a/b/clip.jpg`.
pub fn default_output_path(source: &str, format: ImageFormat) -> Result<String, ThumbnailError> {
    let Some(dot) = source.rfind('.') else {
        return Err(ThumbnailError::BadArgument(format!(
            "cannot derive a thumbnail path from {source}: it has no extension"
        )));
    };
    Ok(format!("{}{}", &source[..=dot], format.extension()))
}

/// Decides where a thumbnail for `source` is written.
///
/// * No destination: next to the source, see [`default_output_path`].
/// * A destination ending in the format's extension is used verbatim.
/// * Any other destination is a directory that receives the default file name.
pub fn resolve_output_path(
    source: &str,
    destination: Option<&str>,
    format: ImageFormat,
) -> Result<String, ThumbnailError> {
    let Some(destination) = destination else {
        return default_output_path(source, format);
    };
    if destination.ends_with(format.extension()) {
        return Ok(destination.to_owned());
    }

    let default_path = default_output_path(source, format)?;

    let file_name = default_path
        .rsplit_once(SEPARATOR)
        .map_or(default_path.as_str(), |(_, name)| name);
    if destination.ends_with(SEPARATOR) {
        Ok(format!("{destination}{file_name}"))
    } else {
        Ok(format!("{destination}{SEPARATOR}{file_name}"))
    }
}

/// Writes the thumbnail to `path`, creating or truncating the file.
pub async fn write_thumbnail(encoded: EncodedImage, path: &str) -> Result<(), ThumbnailError> {
    fs::write(path, encoded.bytes())
        .await
        .map_err(|source| ThumbnailError::WriteFailed {
            path: path.to_owned(),
            source,
        })?;
    debug!("Wrote {} bytes to {path}", encoded.bytes().len());
    Ok(())
}

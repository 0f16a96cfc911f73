use common_types::{ImageFormat, OutputMode, ThumbnailRequest};
use generate_thumbnails::ThumbnailError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Arguments of the `file` and `data` method calls.
#[derive(Debug, Deserialize)]
pub struct ThumbnailArgs {
    pub video: String,
    pub format: i64,
    pub maxhow: i64,
    pub quality: i64,
    /// Only read by `file`.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ThumbnailArgs {
    pub fn from_value(arguments: Value) -> Result<Self, ThumbnailError> {
        serde_json::from_value(arguments)
            .map_err(|e| ThumbnailError::BadArgument(format!("malformed arguments: {e}")))
    }

    pub fn into_request(self, mode: OutputMode) -> Result<ThumbnailRequest, ThumbnailError> {
        let max_dimension = u32::try_from(self.maxhow).map_err(|_| {
            ThumbnailError::BadArgument(format!(
                "maxhow must be a non-negative integer, got {}",
                self.maxhow
            ))
        })?;
        let quality = i32::try_from(self.quality).map_err(|_| {
            ThumbnailError::BadArgument(format!("quality is out of range: {}", self.quality))
        })?;
        let destination = match mode {
            OutputMode::File => self.path,
            OutputMode::Data => None,
        };

        Ok(ThumbnailRequest::builder()
            .source(self.video)
            .format(ImageFormat::from_code(self.format))
            .max_dimension(max_dimension)
            .quality(quality)
            .maybe_destination(destination)
            .headers(self.headers)
            .build())
    }
}

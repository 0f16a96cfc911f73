use crate::OutputMode;

pub const CHANNEL_PREFIX: &str = "video_thumbnail";

/// Name of the channel a result for `source` is delivered on,
/// e.g. `video_thumbnail/data//a/b/clip.mp4`.
#[must_use]
pub fn delivery_channel(mode: OutputMode, source: &str) -> String {
    format!("{CHANNEL_PREFIX}/{}/{source}", mode.as_str())
}

/// An asynchronous result, sent after the originating call was acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub mode: OutputMode,
    pub channel: String,
    pub payload: DeliveryPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPayload {
    /// Encoded image bytes, or the UTF-8 bytes of the written file's path.
    Ok(Vec<u8>),
    Failed { code: String, message: String },
}

impl Delivery {
    #[must_use]
    pub fn ok(mode: OutputMode, source: &str, bytes: Vec<u8>) -> Self {
        Self {
            mode,
            channel: delivery_channel(mode, source),
            payload: DeliveryPayload::Ok(bytes),
        }
    }

    #[must_use]
    pub fn failed(mode: OutputMode, source: &str, code: &str, message: String) -> Self {
        Self {
            mode,
            channel: delivery_channel(mode, source),
            payload: DeliveryPayload::Failed {
                code: code.to_owned(),
                message,
            },
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.payload, DeliveryPayload::Ok(_))
    }
}
